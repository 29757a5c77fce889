use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{CellKind, HEADERS, KINDS, to_cells};
use crate::export::{AttendanceExport, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const HEADER_BG: u32 = 0x2F75B5;
const BAND_EVEN: u32 = 0xEAF3FB;
const BAND_ODD: u32 = 0xFFFFFF;

/// Export XLSX with a styled header, banded rows and fitted column widths.
pub(crate) fn export_xlsx(rows: &[AttendanceExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Attendance").map_err(xlsx_error)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(HEADER_BG))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(xlsx_error)?;

    let mut col_widths: Vec<usize> = HEADERS.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    for (idx, rec) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        let band = Color::RGB(if idx % 2 == 0 { BAND_EVEN } else { BAND_ODD });

        for (col, value) in to_cells(rec).iter().enumerate() {
            write_cell(worksheet, row, col as u16, KINDS[col], value, band)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(xlsx_error)?;
    }

    workbook.save(path).map_err(xlsx_error)?;

    notify_export_success("XLSX", path, rows.len());
    Ok(())
}

/// Date and time columns become Excel serials and numeric columns stay
/// numeric. Free text is always written verbatim.
fn write_cell(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    kind: CellKind,
    s: &str,
    bg: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match kind {
        CellKind::Temporal => {
            if let Some((num_format, serial)) = parse_to_excel_date(s) {
                ws.write_with_format(row, col, serial, &base.set_num_format(num_format))
                    .map_err(xlsx_error)?;
                return Ok(());
            }
        }
        CellKind::Number => {
            if let Ok(num) = s.parse::<f64>() {
                ws.write_with_format(row, col, num, &base.set_align(FormatAlign::Right))
                    .map_err(xlsx_error)?;
                return Ok(());
            }
        }
        CellKind::Text => {}
    }
    ws.write_with_format(row, col, s, &base).map_err(xlsx_error)?;
    Ok(())
}

fn xlsx_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
