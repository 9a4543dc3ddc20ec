use crate::presentation::{
    layout::RowLayout,
    records::RecordList,
    slot::{ArtworkSlot, FetchTicket},
};

/// A reusable visual cell: which row it shows and its artwork destination.
#[derive(Debug, Default)]
pub struct Cell {
    row: Option<usize>,
    pub artwork: ArtworkSlot,
}

impl Cell {
    pub fn row(&self) -> Option<usize> {
        self.row
    }
}

/// A list or grid: the record sequence plus a fixed pool of visible cells.
#[derive(Debug)]
pub struct Surface {
    records: RecordList,
    layout: RowLayout,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(layout: RowLayout, visible: usize) -> Self {
        Surface {
            records: RecordList::new(),
            layout,
            cells: (0..visible).map(|_| Cell::default()).collect(),
        }
    }

    pub fn records(&self) -> &RecordList {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut RecordList {
        &mut self.records
    }

    pub fn layout(&self) -> RowLayout {
        self.layout
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    /// Show `row` in cell `cell`, clearing its old artwork first.
    ///
    /// # Panics
    ///
    /// If either index is out of range.
    pub fn bind(&mut self, cell: usize, row: usize) -> Option<FetchTicket> {
        let url = self.records.record_at(row).image_url.clone();
        let cell = &mut self.cells[cell];
        cell.row = Some(row);
        cell.artwork.assign(url.as_deref())
    }

    pub fn unbind(&mut self, cell: usize) {
        let cell = &mut self.cells[cell];
        cell.row = None;
        cell.artwork.assign(None);
    }

    /// Rebind every cell starting at `first_row`, as a scroll would.
    /// Returns the artwork fetches the new bindings need.
    pub fn show_from(&mut self, first_row: usize) -> Vec<(usize, FetchTicket)> {
        let mut tickets = Vec::new();
        for cell in 0..self.cells.len() {
            let row = first_row + cell;
            if row < self.records.count() {
                if let Some(ticket) = self.bind(cell, row) {
                    tickets.push((cell, ticket));
                }
            } else {
                self.unbind(cell);
            }
        }
        tickets
    }

    /// Re-render from the top after the record sequence changed.
    pub fn reload(&mut self) -> Vec<(usize, FetchTicket)> {
        self.show_from(0)
    }
}
