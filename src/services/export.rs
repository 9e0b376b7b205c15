use rust_xlsxwriter::{Format, Workbook};

use crate::error::{AppError, AppResult};
use crate::models::{CostSource, DailyRecord};

/// UTF-8 byte-order mark. Spreadsheet applications need it to detect the
/// encoding of the delimited export.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

const SHEET_NAME: &str = "Cost report";

/// Column set shared by both export formats: date, one cost column per
/// source, image count, total, notes.
fn header_row(sources: &[CostSource]) -> Vec<String> {
    let mut headers = vec!["Date".to_string()];
    headers.extend(sources.iter().map(|source| format!("{} cost", source.name)));
    headers.push("Images".to_string());
    headers.push("Total cost".to_string());
    headers.push("Notes".to_string());
    headers
}

/// Export the record set as comma-separated text, UTF-8 with BOM. Fields are
/// quoted per RFC 4180, so delimiters inside notes or source names survive a
/// round trip.
pub fn export_csv(records: &[DailyRecord], sources: &[CostSource]) -> AppResult<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(UTF8_BOM);

    let mut writer = csv::Writer::from_writer(buffer);
    writer.write_record(header_row(sources))?;

    for record in records {
        let mut row = vec![record.date.clone()];
        for source in sources {
            row.push(format_cost(record.cost_for(&source.id).unwrap_or(0.0)));
        }
        row.push(record.image_count.to_string());
        row.push(format_cost(record.total_cost));
        row.push(record.notes_text().to_string());
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV buffer error: {}", e)))
}

/// Export the record set as a single-sheet XLSX workbook.
pub fn export_xlsx(records: &[DailyRecord], sources: &[CostSource]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet().set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, header) in header_row(sources).iter().enumerate() {
        worksheet.write_with_format(0, col as u16, header.as_str(), &bold)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write(row, 0, record.date.as_str())?;
        for (offset, source) in sources.iter().enumerate() {
            worksheet.write(
                row,
                offset as u16 + 1,
                record.cost_for(&source.id).unwrap_or(0.0),
            )?;
        }
        let base = sources.len() as u16 + 1;
        worksheet.write(row, base, record.image_count)?;
        worksheet.write(row, base + 1, record.total_cost)?;
        worksheet.write(row, base + 2, record.notes_text())?;
    }

    // Column widths: date, per-source costs, images, total, notes.
    worksheet.set_column_width(0, 12)?;
    for offset in 0..sources.len() {
        worksheet.set_column_width(offset as u16 + 1, 12)?;
    }
    let base = sources.len() as u16 + 1;
    worksheet.set_column_width(base, 10)?;
    worksheet.set_column_width(base + 1, 12)?;
    worksheet.set_column_width(base + 2, 30)?;

    Ok(workbook.save_to_buffer()?)
}

fn format_cost(cost: f64) -> String {
    format!("{:.2}", cost)
}
