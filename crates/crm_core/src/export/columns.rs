//! Column projections from entities to flat export rows.

use crate::aggregate::lookup::{contact_display_name, deal_display_title};
use crate::model::contact::Contact;
use crate::model::deal::Deal;
use crate::model::task::Task;
use chrono::NaiveDate;

/// Value of one exported cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Integer(i64),
    /// Whole-unit currency amount.
    Currency(f64),
    /// Percent in `0..=100`.
    Percent(u8),
    Date(NaiveDate),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// `Text` for `Some`, `Empty` for `None`.
    pub fn optional_text(value: Option<&str>) -> Self {
        value.map_or(Self::Empty, Self::text)
    }

    pub fn optional_date(value: Option<NaiveDate>) -> Self {
        value.map_or(Self::Empty, Self::Date)
    }

    /// Plain-text rendering used by CSV and for spreadsheet width sizing.
    pub fn render(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Currency(value) => value.to_string(),
            Self::Percent(value) => format!("{value}%"),
            Self::Date(value) => value.format("%Y-%m-%d").to_string(),
        }
    }
}

/// One named output column.
pub struct Column<'a, T> {
    pub header: &'static str,
    value: Box<dyn Fn(&T) -> Cell + Send + Sync + 'a>,
}

impl<'a, T> Column<'a, T> {
    pub fn new(header: &'static str, value: impl Fn(&T) -> Cell + Send + Sync + 'a) -> Self {
        Self {
            header,
            value: Box::new(value),
        }
    }

    pub fn cell(&self, record: &T) -> Cell {
        (self.value)(record)
    }
}

/// Ordered set of columns projecting `T` into a row.
pub struct ColumnMapping<'a, T> {
    columns: Vec<Column<'a, T>>,
}

impl<'a, T> ColumnMapping<'a, T> {
    pub fn new(columns: Vec<Column<'a, T>>) -> Self {
        Self { columns }
    }

    pub fn headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.header)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn row(&self, record: &T) -> Vec<Cell> {
        self.columns.iter().map(|column| column.cell(record)).collect()
    }
}

/// ID, Name, Email, Phone, Company, Status, Created Date, Notes.
pub fn contact_columns() -> ColumnMapping<'static, Contact> {
    ColumnMapping::new(vec![
        Column::new("ID", |c: &Contact| Cell::Integer(i64::from(c.id))),
        Column::new("Name", |c: &Contact| Cell::text(c.name.as_str())),
        Column::new("Email", |c: &Contact| Cell::text(c.email.as_str())),
        Column::new("Phone", |c: &Contact| Cell::optional_text(c.phone.as_deref())),
        Column::new("Company", |c: &Contact| {
            Cell::optional_text(c.company.as_deref())
        }),
        Column::new("Status", |c: &Contact| Cell::text(c.status.as_str())),
        Column::new("Created Date", |c: &Contact| {
            Cell::Date(c.created_at.date_naive())
        }),
        Column::new("Notes", |c: &Contact| Cell::optional_text(c.notes.as_deref())),
    ])
}

/// ID, Title, Value, Stage, Probability, Contact, Expected Close, Created
/// Date, Description. `contacts` resolves the Contact column.
pub fn deal_columns(contacts: &[Contact]) -> ColumnMapping<'_, Deal> {
    ColumnMapping::new(vec![
        Column::new("ID", |d: &Deal| Cell::Integer(i64::from(d.id))),
        Column::new("Title", |d: &Deal| Cell::text(d.title.as_str())),
        Column::new("Value", |d: &Deal| Cell::Currency(d.value)),
        Column::new("Stage", |d: &Deal| Cell::text(d.stage.as_str())),
        Column::new("Probability", |d: &Deal| Cell::Percent(d.probability)),
        Column::new("Contact", move |d: &Deal| {
            Cell::Text(contact_display_name(Some(d.contact_id), contacts))
        }),
        Column::new("Expected Close", |d: &Deal| {
            Cell::optional_date(d.expected_close)
        }),
        Column::new("Created Date", |d: &Deal| {
            Cell::Date(d.created_at.date_naive())
        }),
        Column::new("Description", |d: &Deal| {
            Cell::optional_text(d.description.as_deref())
        }),
    ])
}

/// ID, Title, Status, Priority, Due Date, Contact, Deal. Unlinked tasks
/// leave Contact/Deal empty.
pub fn task_columns<'a>(contacts: &'a [Contact], deals: &'a [Deal]) -> ColumnMapping<'a, Task> {
    ColumnMapping::new(vec![
        Column::new("ID", |t: &Task| Cell::Integer(i64::from(t.id))),
        Column::new("Title", |t: &Task| Cell::text(t.title.as_str())),
        Column::new("Status", |t: &Task| Cell::text(t.status.as_str())),
        Column::new("Priority", |t: &Task| Cell::text(t.priority.as_str())),
        Column::new("Due Date", |t: &Task| Cell::optional_date(t.due_date)),
        Column::new("Contact", move |t: &Task| match t.contact_id {
            Some(_) => Cell::Text(contact_display_name(t.contact_id, contacts)),
            None => Cell::Empty,
        }),
        Column::new("Deal", move |t: &Task| match t.deal_id {
            Some(_) => Cell::Text(deal_display_title(t.deal_id, deals)),
            None => Cell::Empty,
        }),
    ])
}
