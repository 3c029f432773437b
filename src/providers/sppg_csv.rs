use std::collections::HashMap;

use crate::errors::internal::ImportError;
use crate::types::db::sppg;
use crate::types::internal::SppgStatus;

/// Columns written by the export, in order
pub const EXPORT_COLUMNS: [&str; 8] = [
    "id_sppg",
    "nama_sppg",
    "provinsi",
    "kabupaten",
    "kecamatan",
    "alamat",
    "prog_stat",
    "reff_attention",
];

const REQUIRED_COLUMN: &str = "nama_sppg";

/// One usable row of an import file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportRow {
    /// Line number in the source file, for error messages
    pub line: u64,
    pub id_sppg: Option<String>,
    pub nama_sppg: String,
    pub provinsi: Option<String>,
    pub kabupaten: Option<String>,
    pub kecamatan: Option<String>,
    pub alamat: Option<String>,
    pub prog_stat: Option<SppgStatus>,
}

/// Parsed import file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedImport {
    pub rows: Vec<ImportRow>,
    /// Rows dropped because `nama_sppg` was empty
    pub skipped: u64,
}

/// Parse an import file
///
/// The first row is the header; column names are matched case-insensitively
/// and unknown columns are ignored. Rows with an empty `nama_sppg` are
/// skipped. An unknown status aborts the whole parse.
pub fn parse_import(input: &str) -> Result<ParsedImport, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input.as_bytes());

    let headers = reader.headers().map_err(|e| ImportError::Malformed {
        line: 1,
        message: e.to_string(),
    })?;

    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(ImportError::MissingHeader);
    }

    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.trim_start_matches('\u{feff}').to_ascii_lowercase(), index))
        .collect();

    if !columns.contains_key(REQUIRED_COLUMN) {
        return Err(ImportError::MissingColumn(REQUIRED_COLUMN.to_string()));
    }

    let mut parsed = ParsedImport::default();

    for result in reader.records() {
        let record = result.map_err(|e| ImportError::Malformed {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let field = |name: &str| -> Option<String> {
            columns
                .get(name)
                .and_then(|index| record.get(*index))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };

        let Some(nama_sppg) = field("nama_sppg") else {
            parsed.skipped += 1;
            continue;
        };

        let prog_stat = match field("prog_stat") {
            Some(raw) => Some(SppgStatus::parse(&raw).ok_or_else(|| ImportError::Malformed {
                line,
                message: format!("unknown status '{}'", raw),
            })?),
            None => None,
        };

        parsed.rows.push(ImportRow {
            line,
            id_sppg: field("id_sppg"),
            nama_sppg,
            provinsi: field("provinsi"),
            kabupaten: field("kabupaten"),
            kecamatan: field("kecamatan"),
            alamat: field("alamat"),
            prog_stat,
        });
    }

    Ok(parsed)
}

/// Render records as CSV with a header row
pub fn write_export(records: &[sppg::Model]) -> Result<String, ImportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(EXPORT_COLUMNS)
        .map_err(|e| ImportError::Write(e.to_string()))?;

    for record in records {
        let status = SppgStatus::from_stored(record.prog_stat.as_deref());
        writer
            .write_record([
                record.id_sppg.as_str(),
                record.nama_sppg.as_str(),
                record.provinsi.as_deref().unwrap_or(""),
                record.kabupaten.as_deref().unwrap_or(""),
                record.kecamatan.as_deref().unwrap_or(""),
                record.alamat.as_deref().unwrap_or(""),
                status.as_str(),
                record.reff_attention.as_deref().unwrap_or(""),
            ])
            .map_err(|e| ImportError::Write(e.to_string()))?;
    }

    let bytes = writer.into_inner().map_err(|e| ImportError::Write(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_without_name_are_skipped() {
        let input = "\
id_sppg,nama_sppg,provinsi,prog_stat
,SPPG Cibinong,JAWA BARAT,
ABCDEFGH,,JAWA BARAT,APPROVED
,  ,BALI,
,SPPG Denpasar,BALI,ON HOLD
";
        let parsed = parse_import(input).unwrap();

        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.skipped, 2);
        assert_eq!(parsed.rows[0].nama_sppg, "SPPG Cibinong");
        assert_eq!(parsed.rows[0].prog_stat, None);
        assert_eq!(parsed.rows[1].prog_stat, Some(SppgStatus::OnHold));
    }

    #[test]
    fn test_headers_are_case_insensitive_and_extra_columns_ignored() {
        let input = "\u{feff}NAMA_SPPG,Provinsi,catatan\nSPPG Medan,SUMATERA UTARA,lorem\n";
        let parsed = parse_import(input).unwrap();

        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].provinsi.as_deref(), Some("SUMATERA UTARA"));
        assert_eq!(parsed.rows[0].id_sppg, None);
    }

    #[test]
    fn test_missing_name_column_is_rejected() {
        let result = parse_import("id_sppg,provinsi\nABCDEFGH,BALI\n");
        assert!(matches!(result, Err(ImportError::MissingColumn(column)) if column == "nama_sppg"));
    }

    #[test]
    fn test_unknown_status_reports_line() {
        let result = parse_import("nama_sppg,prog_stat\nSPPG A,APPROVED\nSPPG B,DONE\n");
        assert!(matches!(result, Err(ImportError::Malformed { line: 3, .. })));
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let parsed = parse_import("nama_sppg,alamat\n\"SPPG Kota, Utara\",\"Jl. Merdeka No. 1, RT 02\"\n").unwrap();

        assert_eq!(parsed.rows[0].nama_sppg, "SPPG Kota, Utara");
        assert_eq!(parsed.rows[0].alamat.as_deref(), Some("Jl. Merdeka No. 1, RT 02"));
    }

    #[test]
    fn test_export_writes_header_and_pending_status_for_unset() {
        let records = vec![sppg::Model {
            id_sppg: "ABCDEFGH".to_string(),
            nama_sppg: "SPPG Kota, Utara".to_string(),
            provinsi: Some("BALI".to_string()),
            kabupaten: None,
            kecamatan: None,
            alamat: None,
            prog_stat: None,
            reff_attention: Some("ATTENTION".to_string()),
            created_at: 0,
            updated_at: 0,
        }];

        let output = write_export(&records).unwrap();
        let mut lines = output.lines();

        assert_eq!(
            lines.next(),
            Some("id_sppg,nama_sppg,provinsi,kabupaten,kecamatan,alamat,prog_stat,reff_attention")
        );
        assert_eq!(
            lines.next(),
            Some("ABCDEFGH,\"SPPG Kota, Utara\",BALI,,,,PENDING UPDATE,ATTENTION")
        );
    }
}
