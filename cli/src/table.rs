// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, marker::PhantomData};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

pub struct Table<'a, T, C: Column<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'static str,
    padding: bool,
}

impl<'a, T, C: Column<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
            padding: true,
        }
    }

    fn compute_columns(&self, table: &[Vec<String>]) -> Vec<ColumnStylizer<'_, T, C>> {
        let max_lengths = self.padding.then(|| get_column_max_width(table));

        let mut columns = Vec::with_capacity(self.columns.len());
        for (i, col) in self.columns.iter().enumerate() {
            let padding_direction = col.padding_direction();

            let padding = if max_lengths.is_none()
                || (i == self.columns.len() - 1 && padding_direction == PaddingDirection::Left)
            {
                None // Last column does not need padding if it's left-aligned
            } else {
                Some((max_lengths.as_ref().map_or(0, |m| m[i]), padding_direction))
            };

            columns.push(ColumnStylizer {
                config: col,
                padding,
                _marker: PhantomData,
            });
        }
        columns
    }
}

impl<T, C: Column<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.is_empty() {
            return Ok(());
        }

        let table: Vec<Vec<String>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();

        let columns = self.compute_columns(&table);

        for (cells, row) in table.into_iter().zip(self.data) {
            for (j, (col, cell)) in columns.iter().zip(cells.into_iter()).enumerate() {
                let cell = col.stylize_cell(row, cell);
                write!(f, "{cell}")?;

                if j < columns.len() - 1 {
                    write!(f, "{}", self.separator)?;
                } else {
                    writeln!(f)?;
                }
            }
        }

        Ok(())
    }
}

pub trait Column<T> {
    fn format(&self, data: &T) -> String;
    fn padding_direction(&self) -> PaddingDirection;
    fn get_color(&self, data: &T) -> Option<Color>;
}

#[derive(Debug, Clone)]
struct ColumnStylizer<'a, T, C: Column<T>> {
    config: &'a C,
    /// padding width and direction
    padding: Option<(usize, PaddingDirection)>,
    _marker: PhantomData<T>,
}

impl<T, C: Column<T>> ColumnStylizer<'_, T, C> {
    fn stylize_cell(&self, data: &T, cell: String) -> String {
        let cell = match self.padding {
            Some((width, PaddingDirection::Left)) => format!("{cell:<width$}"),
            Some((width, PaddingDirection::Right)) => format!("{cell:>width$}"),
            _ => cell,
        };

        self.colorize_cell(data, cell)
    }

    fn colorize_cell(&self, data: &T, cell: String) -> String {
        match self.config.get_color(data) {
            Some(color) => cell.color(color).to_string(),
            _ => cell,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

fn get_column_max_width(table: &[Vec<String>]) -> Vec<usize> {
    let mut max_width = vec![0; table[0].len()];
    for row in table {
        for (i, cell) in row.iter().enumerate() {
            let width = cell.width();
            if width > max_width[i] {
                max_width[i] = width;
            }
        }
    }
    max_width
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Field(usize, PaddingDirection);

    impl Column<Vec<String>> for Field {
        fn format(&self, data: &Vec<String>) -> String {
            data[self.0].clone()
        }

        fn padding_direction(&self) -> PaddingDirection {
            self.1
        }

        fn get_color(&self, _data: &Vec<String>) -> Option<Color> {
            None
        }
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_left_padding_aligns_columns() {
        let columns = [
            Field(0, PaddingDirection::Left),
            Field(1, PaddingDirection::Left),
        ];
        let data = vec![row(&["a", "x"]), row(&["long", "y"])];
        let out = Table::new(&columns, &data).to_string();
        assert_eq!(out, "a     x\nlong  y\n");
    }

    #[test]
    fn test_right_padding_right_aligns() {
        let columns = [
            Field(0, PaddingDirection::Right),
            Field(1, PaddingDirection::Left),
        ];
        let data = vec![row(&["1", "x"]), row(&["1000", "y"])];
        let out = Table::new(&columns, &data).to_string();
        assert_eq!(out, "   1  x\n1000  y\n");
    }

    #[test]
    fn test_last_left_aligned_column_is_unpadded() {
        let columns = [
            Field(0, PaddingDirection::Right),
            Field(1, PaddingDirection::Left),
        ];
        let data = vec![row(&["1", "short"]), row(&["2", "a much longer cell"])];
        let out = Table::new(&columns, &data).to_string();
        assert!(out.starts_with("1  short\n"), "{out}");
    }

    #[test]
    fn test_empty_data_renders_nothing() {
        let columns = [Field(0, PaddingDirection::Left)];
        let data: Vec<Vec<String>> = Vec::new();
        let out = Table::new(&columns, &data).to_string();
        assert_eq!(out, "");
    }
}
