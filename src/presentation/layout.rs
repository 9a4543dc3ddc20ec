use crate::clients::errors::{Error, Result};

pub const LIST_ROW_HEIGHT: f32 = 120.0;
pub const GRID_COLUMNS: u16 = 3;
pub const GRID_SPACING: f32 = 1.0;

/// How tall a row or cell of a surface is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowLayout {
    /// Constant row height, independent of width.
    Fixed { height: f32 },
    /// Square cells: `columns` per line, `spacing` between neighbours.
    Grid { columns: u16, spacing: f32 },
}

impl RowLayout {
    pub fn list() -> Self {
        RowLayout::Fixed {
            height: LIST_ROW_HEIGHT,
        }
    }

    pub fn grid(columns: u16, spacing: f32) -> Result<Self> {
        if columns == 0 {
            return Err(Error::Configuration("grid needs at least one column".into()));
        }
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(Error::Configuration(format!(
                "grid spacing must be a non-negative number, got {spacing}"
            )));
        }
        Ok(RowLayout::Grid { columns, spacing })
    }

    /// Width of one cell for a surface `available_width` wide.
    ///
    /// A hand-built grid with zero columns or negative spacing is treated as
    /// one column with no spacing.
    pub fn cell_width(&self, available_width: f32) -> f32 {
        match *self {
            RowLayout::Fixed { .. } => available_width,
            RowLayout::Grid { spacing, .. } => {
                let columns = f32::from(self.columns());
                let spacing = spacing.max(0.0);
                ((available_width - spacing * (columns - 1.0)) / columns).max(0.0)
            }
        }
    }

    pub fn row_height(&self, available_width: f32) -> f32 {
        match *self {
            RowLayout::Fixed { height } => height,
            RowLayout::Grid { .. } => self.cell_width(available_width),
        }
    }

    pub fn columns(&self) -> u16 {
        match *self {
            RowLayout::Fixed { .. } => 1,
            RowLayout::Grid { columns, .. } => columns.max(1),
        }
    }
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_rows_have_constant_height() {
        let layout = RowLayout::list();
        assert_eq!(layout.row_height(320.0), 120.0);
        assert_eq!(layout.row_height(1024.0), 120.0);
    }

    #[test]
    fn test_grid_cells_are_square() {
        let layout = RowLayout::grid(3, 1.0).unwrap();
        assert_eq!(layout.cell_width(392.0), 130.0);
        assert_eq!(layout.row_height(392.0), 130.0);

        let layout = RowLayout::grid(4, 2.0).unwrap();
        assert_eq!(layout.cell_width(406.0), 100.0);
    }

    #[test]
    fn test_single_column_grid_ignores_spacing() {
        let layout = RowLayout::grid(1, 10.0).unwrap();
        assert_eq!(layout.cell_width(300.0), 300.0);
    }

    #[test]
    fn test_grid_never_goes_negative() {
        let layout = RowLayout::grid(3, 50.0).unwrap();
        assert_eq!(layout.cell_width(60.0), 0.0);
    }

    #[test]
    fn test_hand_built_degenerate_grid_is_safe() {
        let layout = RowLayout::Grid {
            columns: 0,
            spacing: 1.0,
        };
        assert_eq!(layout.columns(), 1);
        assert_eq!(layout.cell_width(300.0), 300.0);
        assert_eq!(layout.row_height(300.0), 300.0);

        let layout = RowLayout::Grid {
            columns: 2,
            spacing: f32::NAN,
        };
        assert_eq!(layout.cell_width(300.0), 150.0);
    }

    #[test]
    fn test_invalid_grid_parameters() {
        assert!(matches!(RowLayout::grid(0, 1.0), Err(Error::Configuration(_))));
        assert!(matches!(RowLayout::grid(3, -1.0), Err(Error::Configuration(_))));
        assert!(matches!(RowLayout::grid(3, f32::NAN), Err(Error::Configuration(_))));
    }
}
