//! Logical-to-physical column mapping for the event store.
//!
//! The store's schema is a fixed set of generically named columns
//! (`blob1..blobN` for string dimensions, `double1..doubleN` for numeric
//! measures and flags). Every query is written against logical field
//! names and translated through this table at build time.
//!
//! The mapping is append-only: indices already assigned here interpret
//! all historically stored data and must never be reassigned. New fields
//! get new, unused indices.

use std::fmt;

/// Semantic field names, closed at compile time.
///
/// Because the enum is closed and [`LogicalField::column`] is a total
/// match, an "unknown field" is unrepresentable — the compiler enforces
/// what would otherwise be a runtime assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalField {
    Host,
    UserAgent,
    Path,
    Country,
    Referrer,
    BrowserName,
    DeviceModel,
    SiteId,
    BrowserVersion,
    DeviceType,
    EventName,
    EventProperties,
    EventCategory,
    EventTarget,
    /// 1 when this record began a new visitor window (resets every 24h).
    NewVisitor,
    /// 1 when this record began a new session (resets after 30m inactivity).
    NewSession,
    /// Bounce flag; the collector may emit a reversal record.
    Bounce,
    EventValue,
}

/// Physical storage column: string blob or numeric double, 1-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalColumn {
    Blob(u8),
    Double(u8),
}

impl fmt::Display for PhysicalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalColumn::Blob(n) => write!(f, "blob{n}"),
            PhysicalColumn::Double(n) => write!(f, "double{n}"),
        }
    }
}

impl LogicalField {
    pub const ALL: [LogicalField; 18] = [
        LogicalField::Host,
        LogicalField::UserAgent,
        LogicalField::Path,
        LogicalField::Country,
        LogicalField::Referrer,
        LogicalField::BrowserName,
        LogicalField::DeviceModel,
        LogicalField::SiteId,
        LogicalField::BrowserVersion,
        LogicalField::DeviceType,
        LogicalField::EventName,
        LogicalField::EventProperties,
        LogicalField::EventCategory,
        LogicalField::EventTarget,
        LogicalField::NewVisitor,
        LogicalField::NewSession,
        LogicalField::Bounce,
        LogicalField::EventValue,
    ];

    /// Physical column backing this field. Total and injective.
    pub const fn column(self) -> PhysicalColumn {
        match self {
            LogicalField::Host => PhysicalColumn::Blob(1),
            LogicalField::UserAgent => PhysicalColumn::Blob(2),
            LogicalField::Path => PhysicalColumn::Blob(3),
            LogicalField::Country => PhysicalColumn::Blob(4),
            LogicalField::Referrer => PhysicalColumn::Blob(5),
            LogicalField::BrowserName => PhysicalColumn::Blob(6),
            LogicalField::DeviceModel => PhysicalColumn::Blob(7),
            LogicalField::SiteId => PhysicalColumn::Blob(8),
            LogicalField::BrowserVersion => PhysicalColumn::Blob(9),
            LogicalField::DeviceType => PhysicalColumn::Blob(10),
            LogicalField::EventName => PhysicalColumn::Blob(11),
            LogicalField::EventProperties => PhysicalColumn::Blob(12),
            LogicalField::EventCategory => PhysicalColumn::Blob(13),
            LogicalField::EventTarget => PhysicalColumn::Blob(14),
            LogicalField::NewVisitor => PhysicalColumn::Double(1),
            LogicalField::NewSession => PhysicalColumn::Double(2),
            LogicalField::Bounce => PhysicalColumn::Double(3),
            LogicalField::EventValue => PhysicalColumn::Double(4),
        }
    }

    /// Physical column identifier as it appears in SQL, e.g. `blob3`.
    pub fn column_name(self) -> String {
        self.column().to_string()
    }
}
