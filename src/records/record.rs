use csv::StringRecord;

/// Column titles written for freshly collected partners
pub const DEFAULT_HEADER: [&str; 4] = ["Company Name", "Profile URL", "Website", "Email"];

/// One partner row
///
/// Columns are positional: name, profile URL, website, email, then any
/// extra columns carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Partner display name (source identifier)
    pub name: String,

    /// Directory profile page URL (may be empty for rows that cannot be scraped)
    pub profile_url: String,

    /// Partner's own website
    pub website: Option<String>,

    /// Contact email
    pub email: Option<String>,

    /// Columns beyond the fourth
    pub extra: Vec<String>,
}

impl ProfileRecord {
    pub fn new(name: impl Into<String>, profile_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile_url: profile_url.into(),
            ..Self::default()
        }
    }

    /// Builds a record from positional CSV fields; blank values become None
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter();
        let name = fields.next().unwrap_or_default().to_string();
        let profile_url = fields.next().unwrap_or_default().trim().to_string();
        let website = non_blank(fields.next());
        let email = non_blank(fields.next());
        let extra = fields.map(str::to_string).collect();

        Self {
            name,
            profile_url,
            website,
            email,
            extra,
        }
    }

    pub fn from_csv(record: &StringRecord) -> Self {
        Self::from_fields(record.iter())
    }

    /// Positional fields for writing, with empty strings for missing values
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.name.clone(),
            self.profile_url.clone(),
            self.website.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
        ];
        fields.extend(self.extra.iter().cloned());
        fields
    }

    /// True when the row has a profile page to visit
    pub fn has_profile_url(&self) -> bool {
        !self.profile_url.is_empty()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A whole CSV file: header row plus partner rows in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTable {
    pub header: Vec<String>,
    pub records: Vec<ProfileRecord>,
}

impl RecordTable {
    /// Creates a table with the standard four-column header
    pub fn with_default_header(records: Vec<ProfileRecord>) -> Self {
        Self {
            header: DEFAULT_HEADER.iter().map(|s| s.to_string()).collect(),
            records,
        }
    }

    /// Pads an input header to four columns and names blank website/email columns
    pub fn normalize_header(mut header: Vec<String>) -> Vec<String> {
        while header.len() < DEFAULT_HEADER.len() {
            header.push(String::new());
        }
        for (index, title) in DEFAULT_HEADER.iter().enumerate().skip(2) {
            if header[index].trim().is_empty() {
                header[index] = title.to_string();
            }
        }
        header
    }
}
