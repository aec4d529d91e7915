//! Catalog loading: source table → validated products → [`Catalog`].

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, warn};

use jewelstore_core::ProductId;

use crate::catalog::Catalog;
use crate::demo;
use crate::error::{CatalogLoadError, RowValidationError};
use crate::product::Product;
use crate::source::{self, Cell, Table};

pub const COL_ID: &str = "№";
pub const COL_PRICE: &str = "цена";
pub const COL_DESCRIPTION: &str = "описание";
pub const COL_SIZE: &str = "размер";
pub const COL_PHOTO: &str = "фото";

pub const REQUIRED_COLUMNS: [&str; 5] = [COL_ID, COL_PRICE, COL_DESCRIPTION, COL_SIZE, COL_PHOTO];

/// Load the catalog from `path`. Never fails: any structural problem with the
/// source is logged and the demo catalog is returned instead.
pub fn load(path: impl AsRef<Path>) -> Catalog {
    let path = path.as_ref();
    let loaded = source::read_table(path).and_then(|table| {
        info!(
            path = %path.display(),
            rows = table.rows.len(),
            columns = ?table.headers,
            "catalog source read"
        );
        load_table(&table)
    });

    match loaded {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "catalog source unusable; serving demo catalog");
            demo::demo_catalog()
        }
    }
}

/// Build a catalog from an already-read table.
///
/// Fails only when a required column is absent; bad rows are skipped.
pub fn load_table(table: &Table) -> Result<Catalog, CatalogLoadError> {
    let columns = Columns::resolve(table)?;

    let mut products = Vec::with_capacity(table.rows.len());
    let mut seen = HashSet::with_capacity(table.rows.len());
    let mut skipped = 0usize;

    for (index, row) in table.rows.iter().enumerate() {
        let parsed = columns.parse_row(row).and_then(|product| {
            if seen.insert(product.id()) {
                Ok(product)
            } else {
                Err(RowValidationError::DuplicateId(product.id()))
            }
        });

        match parsed {
            Ok(product) => products.push(product),
            Err(e @ RowValidationError::Missing { .. }) => {
                skipped += 1;
                debug!(row = index, error = %e, "skipping incomplete catalog row");
            }
            Err(e) => {
                skipped += 1;
                warn!(
                    row = index,
                    error = %e,
                    contents = %describe_row(&table.headers, row),
                    "skipping invalid catalog row"
                );
            }
        }
    }

    info!(loaded = products.len(), skipped, "catalog built");
    Ok(Catalog::new(products))
}

/// Column positions of the required fields.
struct Columns {
    id: usize,
    price: usize,
    description: usize,
    size: usize,
    photo: usize,
}

impl Columns {
    fn resolve(table: &Table) -> Result<Self, CatalogLoadError> {
        let missing = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| table.column(name).is_none())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(CatalogLoadError::MissingColumns(missing));
        }

        let at = |name| table.column(name).unwrap_or_default();
        Ok(Self {
            id: at(COL_ID),
            price: at(COL_PRICE),
            description: at(COL_DESCRIPTION),
            size: at(COL_SIZE),
            photo: at(COL_PHOTO),
        })
    }

    fn parse_row(&self, row: &[Cell]) -> Result<Product, RowValidationError> {
        let cell = |i: usize| row.get(i).unwrap_or(&Cell::Empty);

        let id = parse_id(cell(self.id))?;
        let price = parse_price(cell(self.price))?;
        let description = cell(self.description).text();
        let size = cell(self.size).text();
        let photo = cell(self.photo).text();

        Ok(Product::from_listing(
            id,
            price,
            description.as_deref(),
            size.as_deref(),
            photo.as_deref(),
        ))
    }
}

fn parse_id(cell: &Cell) -> Result<ProductId, RowValidationError> {
    let unparseable = || RowValidationError::Unparseable {
        column: COL_ID,
        expected: "positive integer",
        raw: cell.to_string(),
    };

    let raw = match cell {
        _ if cell.is_missing() => return Err(RowValidationError::Missing { column: COL_ID }),
        Cell::Int(v) => u64::try_from(*v).ok(),
        Cell::Float(v) => whole_number(*v),
        Cell::Text(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
        }
        Cell::Bool(_) | Cell::Empty => None,
    };

    raw.and_then(ProductId::new).ok_or_else(unparseable)
}

fn whole_number(v: f64) -> Option<u64> {
    (v.is_finite() && v.fract() == 0.0 && v >= 0.0 && v <= u64::MAX as f64).then_some(v as u64)
}

fn parse_price(cell: &Cell) -> Result<f64, RowValidationError> {
    let price = match cell {
        _ if cell.is_missing() => return Err(RowValidationError::Missing { column: COL_PRICE }),
        Cell::Int(v) => *v as f64,
        Cell::Float(v) => *v,
        Cell::Text(s) => {
            let s = s.trim();
            s.parse::<f64>()
                .or_else(|_| s.replace(',', ".").parse::<f64>())
                .map_err(|_| RowValidationError::Unparseable {
                    column: COL_PRICE,
                    expected: "number",
                    raw: s.to_string(),
                })?
        }
        Cell::Bool(_) | Cell::Empty => {
            return Err(RowValidationError::Unparseable {
                column: COL_PRICE,
                expected: "number",
                raw: cell.to_string(),
            });
        }
    };

    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(RowValidationError::InvalidPrice(price))
    }
}

fn describe_row(headers: &[String], row: &[Cell]) -> String {
    let fields = headers
        .iter()
        .zip(row.iter().chain(std::iter::repeat(&Cell::Empty)))
        .map(|(h, c)| format!("{}={:?}", h.trim(), c.to_string()))
        .collect::<Vec<_>>();
    format!("{{{}}}", fields.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Category, DEFAULT_DESCRIPTION, DEFAULT_SIZE};
    use std::io::Write;

    fn headers() -> Vec<String> {
        vec![" № ", "цена", "описание ", "размер", "фото"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn text(s: &str) -> Cell {
        Cell::from(s)
    }

    #[test]
    fn valid_rows_become_products() {
        let table = Table::new(
            headers(),
            vec![
                vec![
                    Cell::Float(1.0),
                    Cell::Float(12500.0),
                    text("Золотая цепочка с бриллиантом"),
                    text("45"),
                    text("https://cloud.mail.ru/public/H2DC/ML95dukgp"),
                ],
                vec![Cell::Int(2), text("990,50"), Cell::Empty, Cell::Empty, text("nan")],
            ],
        );

        let catalog = load_table(&table).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_demo());

        let chain = &catalog.all()[0];
        assert_eq!(chain.name(), "Chain gold with diamond");
        assert_eq!(chain.category(), Category::ChainsAndNecklaces);
        assert_eq!(chain.price(), 12500.0);
        assert_eq!(chain.size(), "45");
        assert!(chain.is_external_image());

        let plain = &catalog.all()[1];
        assert_eq!(plain.name(), "Item №2");
        assert_eq!(plain.price(), 990.5);
        assert_eq!(plain.description(), DEFAULT_DESCRIPTION);
        assert_eq!(plain.size(), DEFAULT_SIZE);
        assert_eq!(plain.image(), crate::PLACEHOLDER_IMAGE);
    }

    #[test]
    fn rows_without_id_or_price_are_skipped() {
        let table = Table::new(
            headers(),
            vec![
                vec![Cell::Empty, Cell::Int(100), text("кольцо")],
                vec![Cell::Int(2), Cell::Empty, text("кольцо")],
                vec![text("abc"), Cell::Int(100)],
                vec![Cell::Int(4), text("дорого")],
                vec![Cell::Int(5), Cell::Int(300)],
                vec![],
            ],
        );

        let catalog = load_table(&table).unwrap();
        let ids = catalog.all().iter().map(|p| p.id().get()).collect::<Vec<_>>();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn fractional_zero_and_negative_values_are_rejected() {
        let table = Table::new(
            headers(),
            vec![
                vec![Cell::Float(1.5), Cell::Int(10)],
                vec![Cell::Int(0), Cell::Int(10)],
                vec![Cell::Int(-3), Cell::Int(10)],
                vec![Cell::Int(4), Cell::Float(-1.0)],
                vec![Cell::Int(5), Cell::Float(f64::NAN)],
                vec![text(" 6 "), text(" 0 ")],
            ],
        );

        let catalog = load_table(&table).unwrap();
        let ids = catalog.all().iter().map(|p| p.id().get()).collect::<Vec<_>>();
        assert_eq!(ids, vec![6]);
        assert_eq!(catalog.all()[0].price(), 0.0);
    }

    #[test]
    fn duplicate_ids_are_skipped() {
        let table = Table::new(
            headers(),
            vec![
                vec![Cell::Int(1), Cell::Int(10), text("кольцо")],
                vec![Cell::Int(1), Cell::Int(20), text("серьги")],
            ],
        );

        let catalog = load_table(&table).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.all()[0].price(), 10.0);
    }

    #[test]
    fn missing_columns_is_a_load_error() {
        let table = Table::new(vec!["№".into(), "цена".into()], vec![]);
        match load_table(&table) {
            Err(CatalogLoadError::MissingColumns(cols)) => {
                assert_eq!(cols, vec![COL_DESCRIPTION, COL_SIZE, COL_PHOTO]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_source_falls_back_to_demo() {
        let catalog = load("/no/such/dir/price.xlsx");
        assert!(catalog.is_demo());
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn source_missing_columns_falls_back_to_demo() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,price").unwrap();
        writeln!(file, "1,100").unwrap();

        let catalog = load(file.path());
        assert!(catalog.is_demo());
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn loads_csv_source() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "№ , цена ,описание,размер,фото").unwrap();
        writeln!(file, "1,45000,Золотое кольцо с изумрудом,17,").unwrap();
        writeln!(file, ",,,,").unwrap();
        writeln!(file, "3,8500,Серебряные серьги,,https://example.com/e.jpg").unwrap();

        let catalog = load(file.path());
        assert!(!catalog.is_demo());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.all()[0].name(), "Ring gold with emerald");
        assert_eq!(catalog.all()[1].name(), "Earrings silver");
        assert_eq!(catalog.all()[1].image(), "https://example.com/e.jpg");
    }

    #[test]
    fn invalid_utf8_row_does_not_discard_the_catalog() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all("№,цена,описание,размер,фото\n1,100,Кольцо,17,\n2,200,".as_bytes())
            .unwrap();
        file.write_all(b"\xff\xfe bad,17,\n").unwrap();
        file.write_all("3,300,Серьги,,\n".as_bytes()).unwrap();

        let catalog = load(file.path());
        assert!(!catalog.is_demo());

        let ids = catalog.all().iter().map(|p| p.id().get()).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.all()[0].name(), "Ring №1");
        assert_eq!(catalog.all()[2].name(), "Earrings №3");
    }

    #[test]
    fn loads_xlsx_source() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/price.xlsx");
        let catalog = load(&path);
        assert!(!catalog.is_demo());

        let names = catalog.all().iter().map(Product::name).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["Ring gold with diamond", "Earrings silver with pearl", "Bracelet №3"]
        );

        let ring = &catalog.all()[0];
        assert_eq!(ring.id().get(), 1);
        assert_eq!(ring.price(), 45_000.0);
        assert_eq!(ring.size(), "17");
        assert_eq!(ring.image(), "https://thumb.cloud.mail.ru/weblink/thumb/xw1/AB/cd");

        let earrings = &catalog.all()[1];
        assert_eq!(earrings.price(), 8_500.5);
        assert_eq!(earrings.size(), DEFAULT_SIZE);
        assert_eq!(earrings.image(), crate::PLACEHOLDER_IMAGE);

        assert_eq!(catalog.all()[2].price(), 990.5);
    }

    #[test]
    fn row_description_lists_every_header() {
        let described = describe_row(
            &["№".to_string(), "цена".to_string()],
            &[Cell::Int(3)],
        );
        assert_eq!(described, "{№=\"3\", цена=\"\"}");
    }
}
