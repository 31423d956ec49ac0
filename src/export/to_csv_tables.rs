use csv::WriterBuilder;

use crate::errors::{ExportError, ExportResult};
use crate::layout::Document;

/// Every table primitive flattened to CSV. Rows carry their page, the table's position on
/// that page and whether they are a header row; the remaining columns are the cells.
pub fn render(document: &Document) -> ExportResult<String> {
    let mut buffer = Vec::new();
    {
        let mut writer = WriterBuilder::new().flexible(true).from_writer(&mut buffer);
        writer.write_record(["page", "table", "row", "cells"])?;

        let mut previous_page = 0;
        let mut table_on_page = 0;
        for (page, table) in document.tables() {
            table_on_page = if page == previous_page { table_on_page + 1 } else { 1 };
            previous_page = page;

            let header = (!table.header.is_empty()).then_some(("header".to_string(), &table.header));
            let body = table
                .rows
                .iter()
                .enumerate()
                .map(|(i, row)| ((i + 1).to_string(), row));
            for (row, cells) in header.into_iter().chain(body) {
                let mut record = vec![page.to_string(), table_on_page.to_string(), row];
                record.extend(cells.iter().map(|cell| cell.text.clone()));
                writer.write_record(&record)?;
            }
        }
        writer.flush().map_err(|e| ExportError::Csv(e.to_string()))?;
    }
    String::from_utf8(buffer).map_err(|e| ExportError::Csv(e.to_string()))
}
