use chrono::{DateTime, Utc};
use search_core::SearchResult;
use search_core::result::{Item, bool_field, str_field};

const NO_RESULTS_HEADER: &str = "No repositories matched your search";
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRow {
    pub full_name: String,
    pub description: String,
    pub info: String,
    pub updated_at: String,
}

impl RepoRow {
    pub fn from_item(item: &Item, tty: bool) -> Self {
        let private = bool_field(item, "private").unwrap_or(false);
        let mut tags = vec![if private { "private" } else { "public" }];
        if bool_field(item, "fork").unwrap_or(false) {
            tags.push("fork");
        }
        if bool_field(item, "archived").unwrap_or(false) {
            tags.push("archived");
        }

        let updated_at = str_field(item, "updated_at").unwrap_or_default();

        Self {
            full_name: str_field(item, "full_name").unwrap_or_default().to_string(),
            description: collapse_whitespace(str_field(item, "description").unwrap_or_default()),
            info: tags.join(", "),
            updated_at: if tty {
                format_timestamp(updated_at)
            } else {
                updated_at.to_string()
            },
        }
    }

    fn fields(&self) -> [&str; 4] {
        [
            self.full_name.as_str(),
            self.description.as_str(),
            self.info.as_str(),
            self.updated_at.as_str(),
        ]
    }
}

/// Terminal output aligns columns and adds a summary header; piped output
/// is one tab-separated line per repository.
pub fn render_table(result: &SearchResult, tty: bool) -> String {
    let rows: Vec<RepoRow> = result
        .items
        .iter()
        .map(|item| RepoRow::from_item(item, tty))
        .collect();

    if !tty {
        return rows
            .iter()
            .map(|row| row.fields().join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    if rows.is_empty() {
        return format!("\n{NO_RESULTS_HEADER}");
    }

    let header = format!(
        "\nShowing {} of {} repositories\n",
        rows.len(),
        result.total_count
    );
    format!("{header}\n{}", align_columns(&rows))
}

pub fn render_items_json(result: &SearchResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&result.items)
}

fn align_columns(rows: &[RepoRow]) -> String {
    let mut widths = [0usize; 4];
    for row in rows {
        for (width, field) in widths.iter_mut().zip(row.fields()) {
            *width = (*width).max(field.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let fields = row.fields();
            let last = fields.len() - 1;
            fields
                .iter()
                .enumerate()
                .map(|(index, field)| {
                    if index == last {
                        field.to_string()
                    } else {
                        format!("{field:<width$}", width = widths[index])
                    }
                })
                .collect::<Vec<_>>()
                .join(COLUMN_GAP)
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed
            .with_timezone(&Utc)
            .format("%d %b %y %H:%M UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
