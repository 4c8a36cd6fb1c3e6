//! Catalog loading: CSV decoding, column projection, name cleanup and dedup.
//!
//! The whole module runs once at startup. Its output, [`CanonicalTable`], is
//! immutable afterwards and shared read-only between requests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use rand::Rng;

use crate::cleaner::{clean_product_name, UNKNOWN_PRODUCT};
use crate::columns::{detect_columns, ColumnInfo, ColumnMapping};
use crate::config::Config;
use crate::error::LoadError;

/// A column as read from the file. Blank cells are `None`.
#[derive(Debug, Clone)]
pub struct RawColumn {
    pub name: String,
    pub cells: Vec<Option<String>>,
}

impl RawColumn {
    /// Free text if any non-empty cell fails to parse as a number.
    pub fn is_text(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .any(|cell| cell.parse::<f64>().is_err())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<RawColumn>,
}

impl RawTable {
    /// Parses CSV text whose first record is the header row.
    pub fn from_csv_text(text: &str) -> Result<Self, LoadError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records();
        let headers = match records.next() {
            Some(record) => unique_headers(record?.iter()),
            None => return Ok(Self::default()),
        };

        let mut columns: Vec<RawColumn> = headers
            .into_iter()
            .map(|name| RawColumn {
                name,
                cells: Vec::new(),
            })
            .collect();

        for record in records {
            let record = record?;
            let row: Vec<Option<String>> = (0..columns.len())
                .map(|idx| record.get(idx).and_then(normalize_cell))
                .collect();
            if row.iter().all(Option::is_none) {
                continue;
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.cells.push(cell);
            }
        }

        Ok(Self { columns })
    }

    pub fn column(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column_infos(&self) -> Vec<ColumnInfo> {
        self.columns
            .iter()
            .map(|c| ColumnInfo::new(c.name.clone(), c.is_text()))
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trims header names and suffixes repeats as `name.1`, `name.2`, ...
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::new();
    for name in raw {
        let base = name.trim().trim_matches('\u{feff}').to_string();
        let mut candidate = base.clone();
        let mut suffix = 1;
        while !seen.insert(candidate.clone()) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        headers.push(candidate);
    }
    headers
}

/// Decodes file bytes as UTF-8, falling back to Latin-1.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::warn!("Dataset is not valid UTF-8; decoding as Latin-1");
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}

fn parse_number(cell: Option<&String>) -> Option<f64> {
    cell.and_then(|c| c.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// One usable catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub product_name: String,
    pub description: String,
    pub rating: Option<f64>,
    pub review_count: Option<f64>,
}

impl ProductRecord {
    pub fn new(product_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            description: description.into(),
            rating: None,
            review_count: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_review_count(mut self, review_count: f64) -> Self {
        self.review_count = Some(review_count);
        self
    }
}

/// Deduplicated product table. Names are unique; first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct CanonicalTable {
    records: Vec<ProductRecord>,
}

impl CanonicalTable {
    pub fn new(records: impl IntoIterator<Item = ProductRecord>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|r| seen.insert(r.product_name.clone()))
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// Draws up to `amount` distinct records in random order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, amount: usize) -> Vec<&ProductRecord> {
        let amount = amount.min(self.records.len());
        rand::seq::index::sample(rng, self.records.len(), amount)
            .into_iter()
            .map(|i| &self.records[i])
            .collect()
    }
}

/// Projects the mapped columns into a [`CanonicalTable`].
///
/// Rows without a name or description are dropped, names are cleaned, rows
/// whose name cleans to the sentinel are dropped, then duplicates by name.
pub fn build_table(raw: &RawTable, mapping: &ColumnMapping) -> Result<CanonicalTable, LoadError> {
    let unmappable = || LoadError::Unmappable {
        columns: raw.column_names(),
    };
    let (name_col, desc_col) = mapping.required().ok_or_else(unmappable)?;
    let names = raw.column(name_col).ok_or_else(unmappable)?;
    let descriptions = raw.column(desc_col).ok_or_else(unmappable)?;
    let ratings = mapping.rating.as_deref().and_then(|c| raw.column(c));
    let review_counts = mapping.review_count.as_deref().and_then(|c| raw.column(c));

    let records = (0..raw.row_count()).filter_map(|row| {
        let name = names.cells[row].as_ref()?;
        let description = descriptions.cells[row].as_ref()?;

        let product_name = clean_product_name(name);
        if product_name == UNKNOWN_PRODUCT {
            return None;
        }

        Some(ProductRecord {
            product_name,
            description: description.clone(),
            rating: ratings.and_then(|c| parse_number(c.cells[row].as_ref())),
            review_count: review_counts.and_then(|c| parse_number(c.cells[row].as_ref())),
        })
    });

    Ok(CanonicalTable::new(records))
}

/// Reads, maps and cleans one catalog file.
pub fn load_path(path: &Path) -> Result<CanonicalTable, LoadError> {
    tracing::info!("📂 Loading dataset from {}", path.display());
    let bytes = std::fs::read(path)?;
    let raw = RawTable::from_csv_text(&decode_text(&bytes))?;

    let preview: Vec<&str> = raw.columns.iter().take(20).map(|c| c.name.as_str()).collect();
    tracing::info!("CSV columns: {:?}", preview);

    let mapping = detect_columns(&raw.column_infos());
    tracing::info!("Detected columns mapping: {:?}", mapping);

    let table = build_table(&raw, &mapping)?;
    tracing::info!("✅ Final usable rows: {}", table.len());
    Ok(table)
}

/// First existing `<dir>/<data_file>` among the configured search dirs.
pub fn find_dataset(config: &Config) -> Option<PathBuf> {
    config
        .search_dirs()
        .into_iter()
        .map(|dir| dir.join(&config.data_file))
        .find(|path| path.is_file())
}

/// Builds the product table for the process. Never fails: any problem is
/// logged and yields an empty table so the service still answers health checks.
pub fn load(config: &Config) -> CanonicalTable {
    let result = match find_dataset(config) {
        Some(path) => load_path(&path),
        None => Err(LoadError::NotFound {
            file: config.data_file.clone(),
        }),
    };

    result.unwrap_or_else(|e| {
        tracing::error!("❌ {}", e);
        CanonicalTable::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    const FLIPKART_LIKE: &str = "\
uniq_id,product_url,product_name,description,product_rating,overall_rating
1,http://www.flipkart.com/a,Alisha Solid Women's Cycling Shorts,Great shorts for cycling,4.5,4.5
2,http://www.flipkart.com/b,product_name,Header leaked into data,No rating available,No rating available
3,http://www.flipkart.com/c,FabHomeDecor Sofa_Bed,Comfortable sofa bed,No rating available,3
4,http://www.flipkart.com/d,Alisha Solid Women's Cycling Shorts,Duplicate listing,1,1
5,http://www.flipkart.com/e,,Missing name,2,2
6,http://www.flipkart.com/f,12345,Numeric junk,2,2
";

    #[test]
    fn test_builds_clean_unique_table() {
        let raw = RawTable::from_csv_text(FLIPKART_LIKE).unwrap();
        let mapping = detect_columns(&raw.column_infos());
        assert_eq!(mapping.product_name.as_deref(), Some("product_name"));
        assert_eq!(mapping.description.as_deref(), Some("description"));
        assert_eq!(mapping.rating.as_deref(), Some("product_rating"));

        let table = build_table(&raw, &mapping).unwrap();
        let names: Vec<&str> = table.records().iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, vec!["Alisha Solid Women's Cycling Shorts", "FabHomeDecor Sofa Bed"]);

        assert_eq!(table.records()[0].description, "Great shorts for cycling");
        assert_eq!(table.records()[0].rating, Some(4.5));
        assert_eq!(table.records()[1].rating, None);
    }

    #[test]
    fn test_rows_without_description_are_dropped_before_dedup() {
        let csv = "\
product_name,description,product_rating
Steel Water Bottle,,4
Steel_Water_Bottle,   ,5
Steel Water Bottle,Keeps drinks cold,3
";
        let raw = RawTable::from_csv_text(csv).unwrap();
        let table = build_table(&raw, &detect_columns(&raw.column_infos())).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].product_name, "Steel Water Bottle");
        assert_eq!(table.records()[0].description, "Keeps drinks cold");
        assert_eq!(table.records()[0].rating, Some(3.0));
    }

    #[test]
    fn test_duplicate_headers_are_disambiguated() {
        let raw = RawTable::from_csv_text("name,name,desc\nA1,B1,text\n").unwrap();
        assert_eq!(raw.column_names(), vec!["name", "name.1", "desc"]);
    }

    #[test]
    fn test_ragged_rows_and_blank_lines() {
        let raw = RawTable::from_csv_text("title,summary,stars\nLamp,Warm light\n,,\nDesk,Oak desk,4,extra\n")
            .unwrap();
        assert_eq!(raw.row_count(), 2);
        assert_eq!(raw.column("stars").unwrap().cells, vec![None, Some("4".to_string())]);
    }

    #[test]
    fn test_numeric_columns_are_not_text() {
        let raw = RawTable::from_csv_text("a,b,c\n1,x,\n2.5,y,\n").unwrap();
        let infos = raw.column_infos();
        assert!(!infos[0].is_text);
        assert!(infos[1].is_text);
        assert!(!infos[2].is_text);
    }

    #[test]
    fn test_unmappable_schema() {
        let raw = RawTable::from_csv_text("price,qty\n1,2\n").unwrap();
        let mapping = detect_columns(&raw.column_infos());
        assert!(matches!(build_table(&raw, &mapping), Err(LoadError::Unmappable { .. })));
    }

    #[test]
    fn test_decodes_latin1_fallback() {
        let bytes = b"name,description\nCaf\xe9 Mug,Nice mug\n";
        let text = decode_text(bytes);
        assert!(text.contains("Café Mug"));
        assert_eq!(decode_text("\u{feff}a,b".as_bytes()), "a,b");
    }

    #[test]
    fn test_load_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Product Name,Description,Review Count\nCaf\xe9 Mug,Nice mug,12\n")
            .unwrap();

        let table = load_path(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].product_name, "Café Mug");
        assert_eq!(table.records()[0].review_count, Some(12.0));
    }

    #[test]
    fn test_load_degrades_to_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_file: "definitely-missing-catalog.csv".to_string(),
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        assert!(load(&config).is_empty());

        std::fs::write(dir.path().join("numbers.csv"), "price,qty\n1,2\n").unwrap();
        let config = Config {
            data_file: "numbers.csv".to_string(),
            ..config
        };
        assert!(load(&config).is_empty());
    }

    #[test]
    fn test_load_finds_file_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("catalog.csv"), "title,details\nLamp,Warm light\n").unwrap();
        let config = Config {
            data_file: "catalog.csv".to_string(),
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        assert_eq!(load(&config).len(), 1);
    }

    #[test]
    fn test_sample_without_replacement() {
        let table = CanonicalTable::new(
            (0..10).map(|i| ProductRecord::new(format!("Item {i}"), "desc")),
        );
        let mut rng = StdRng::seed_from_u64(7);

        let sample = table.sample(&mut rng, 50);
        assert_eq!(sample.len(), 10);
        let unique: HashSet<&str> = sample.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(unique.len(), 10);

        assert_eq!(table.sample(&mut rng, 3).len(), 3);
    }

    #[test]
    fn test_table_keeps_first_duplicate() {
        let table = CanonicalTable::new(vec![
            ProductRecord::new("Mug", "first"),
            ProductRecord::new("Mug", "second"),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].description, "first");
    }
}
