use crate::{
    storage::table::Table,
    types::{CellNum, PageNum, error::Result, row::Row},
};

/// A position in the table: a page and a cell within it.
pub struct Cursor<'a> {
    table: &'a mut Table,
    pub page_num: PageNum,
    pub cell_num: CellNum,
    pub end_of_table: bool,
}

impl<'a> Cursor<'a> {
    /// Positions at the first row of the table.
    pub fn table_start(table: &'a mut Table) -> Result<Self> {
        let page_num = table.root_page_num;
        let cell_count = table.root_page()?.cell_count();
        Ok(Self {
            table,
            page_num,
            cell_num: 0,
            end_of_table: cell_count == 0,
        })
    }

    /// Positions one past the last row, where the next insert lands.
    pub fn table_end(table: &'a mut Table) -> Result<Self> {
        let page_num = table.root_page_num;
        let cell_count = table.root_page()?.cell_count();
        Ok(Self {
            table,
            page_num,
            cell_num: cell_count,
            end_of_table: true,
        })
    }

    pub fn value(&mut self) -> Result<&mut [u8]> {
        let page = self.table.pager_mut().get_page(self.page_num)?;
        page.cell_mut(self.cell_num as usize)
    }

    pub fn row(&mut self) -> Result<Row> {
        let page = self.table.pager_mut().get_page(self.page_num)?;
        Ok(Row::deserialize(page.cell(self.cell_num as usize)?))
    }

    /// Moves back to the first row, picking up rows inserted meanwhile.
    pub fn rewind(&mut self) -> Result<()> {
        self.page_num = self.table.root_page_num;
        self.cell_num = 0;
        self.end_of_table = self.table.root_page()?.cell_count() == 0;
        Ok(())
    }

    pub fn advance(&mut self) -> Result<()> {
        let cell_count = self.table.pager_mut().get_page(self.page_num)?.cell_count();
        self.cell_num += 1;
        if self.cell_num >= cell_count {
            self.end_of_table = true;
        }
        Ok(())
    }
}
