//! Password entry model shared by the reader, grouper and serializer

/// A KeePass string field carried by every entry.
///
/// The variant order is the order fields are written to the XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    UserName,
    Password,
    Notes,
    Title,
}

impl Field {
    /// All fields in output order.
    pub const ALL: [Field; 5] = [
        Field::Url,
        Field::UserName,
        Field::Password,
        Field::Notes,
        Field::Title,
    ];

    /// Key name KeePass expects in `<String><Key>`.
    pub fn key(self) -> &'static str {
        match self {
            Field::Url => "URL",
            Field::UserName => "UserName",
            Field::Password => "Password",
            Field::Notes => "Notes",
            Field::Title => "Title",
        }
    }

    /// Whether the value is marked `ProtectInMemory="True"`.
    pub fn is_protected(self) -> bool {
        matches!(self, Field::Password)
    }
}

/// One password entry from the export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub title: String,
    pub url: String,
    pub username: String,
    pub password: String,
    pub notes: String,
    pub tags: Option<String>,
}

impl Record {
    /// Raw (unescaped) value of a string field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Url => &self.url,
            Field::UserName => &self.username,
            Field::Password => &self.password,
            Field::Notes => &self.notes,
            Field::Title => &self.title,
        }
    }

    /// Fields that will be written, in output order. Empty values are skipped.
    pub fn present_fields(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
            .filter(|(_, value)| !value.is_empty())
    }
}

/// A parsed input row: the record plus its raw grouping label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    pub grouping: String,
    pub record: Record,
}
