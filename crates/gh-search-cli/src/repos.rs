use search_core::{
    Parameter, Qualifier, Qualifiers, Query, QueryError, Validator, ValueKind, bool_validator,
    date_validator, multi_opts_validator, opts_validator, range_validator, query::DEFAULT_LIMIT,
};

pub const KIND: &str = "repositories";

const ORDER_OPTIONS: &[&str] = &["asc", "desc"];
const SORT_OPTIONS: &[&str] = &["forks", "help-wanted-issues", "stars", "updated"];
const FORK_OPTIONS: &[&str] = &["false", "true", "only"];
const IN_OPTIONS: &[&str] = &["name", "description", "readme"];
const VISIBILITY_OPTIONS: &[&str] = &["public", "private"];

/// One repository search qualifier: flag/key, label, input kind, default and rule.
#[derive(Debug, Clone, Copy)]
pub struct QualifierDecl {
    pub label: &'static str,
    pub key: &'static str,
    pub kind: ValueKind,
    pub default: &'static str,
    pub validator: Option<Validator>,
    pub help: &'static str,
}

impl QualifierDecl {
    const fn new(
        label: &'static str,
        key: &'static str,
        kind: ValueKind,
        default: &'static str,
        validator: Option<Validator>,
        help: &'static str,
    ) -> Self {
        Self {
            label,
            key,
            kind,
            default,
            validator,
            help,
        }
    }

    pub fn build(&self) -> Qualifier {
        Qualifier::new(self.key, self.kind, self.default, self.validator)
    }
}

pub const REPO_QUALIFIERS: &[QualifierDecl] = &[
    QualifierDecl::new(
        "Archived",
        "archived",
        ValueKind::Bool,
        "",
        Some(bool_validator()),
        "Filter based on archive state",
    ),
    QualifierDecl::new(
        "Created",
        "created",
        ValueKind::String,
        "",
        Some(date_validator()),
        "Filter based on created at date",
    ),
    QualifierDecl::new(
        "Followers",
        "followers",
        ValueKind::String,
        "",
        Some(range_validator()),
        "Filter based on number of followers",
    ),
    QualifierDecl::new(
        "Fork",
        "fork",
        ValueKind::String,
        "false",
        Some(opts_validator(FORK_OPTIONS)),
        "Include forks in fetched repositories: false, true, or only",
    ),
    QualifierDecl::new(
        "Forks",
        "forks",
        ValueKind::String,
        "",
        Some(range_validator()),
        "Filter on number of forks",
    ),
    QualifierDecl::new(
        "GoodFirstIssues",
        "good-first-issues",
        ValueKind::String,
        "",
        Some(range_validator()),
        "Filter on number of issues with the 'good first issue' label",
    ),
    QualifierDecl::new(
        "HelpWantedIssues",
        "help-wanted-issues",
        ValueKind::String,
        "",
        Some(range_validator()),
        "Filter on number of issues with the 'help wanted' label",
    ),
    QualifierDecl::new(
        "In",
        "in",
        ValueKind::String,
        "name,description",
        Some(multi_opts_validator(IN_OPTIONS)),
        "Restrict search to specific fields of repository: name, description, readme",
    ),
    QualifierDecl::new(
        "Language",
        "language",
        ValueKind::String,
        "",
        None,
        "Filter based on the coding language",
    ),
    QualifierDecl::new(
        "License",
        "license",
        ValueKind::String,
        "",
        None,
        "Filter based on license type",
    ),
    QualifierDecl::new(
        "Mirror",
        "mirror",
        ValueKind::Bool,
        "",
        Some(bool_validator()),
        "Filter based on mirror state",
    ),
    QualifierDecl::new(
        "Org",
        "org",
        ValueKind::String,
        "",
        None,
        "Filter on organization",
    ),
    QualifierDecl::new(
        "Pushed",
        "pushed",
        ValueKind::String,
        "",
        Some(date_validator()),
        "Filter on last pushed at date",
    ),
    QualifierDecl::new(
        "Repo",
        "repo",
        ValueKind::String,
        "",
        None,
        "Filter on repository name",
    ),
    QualifierDecl::new(
        "Size",
        "size",
        ValueKind::String,
        "",
        Some(range_validator()),
        "Filter on a size range, in kilobytes",
    ),
    QualifierDecl::new(
        "Stars",
        "stars",
        ValueKind::String,
        "",
        Some(range_validator()),
        "Filter on number of stars",
    ),
    QualifierDecl::new(
        "Topic",
        "topic",
        ValueKind::String,
        "",
        None,
        "Filter on topic",
    ),
    QualifierDecl::new(
        "Topics",
        "topics",
        ValueKind::String,
        "",
        Some(range_validator()),
        "Filter on number of topics",
    ),
    QualifierDecl::new(
        "User",
        "user",
        ValueKind::String,
        "",
        None,
        "Filter based on user",
    ),
    QualifierDecl::new(
        "Visibility",
        "is",
        ValueKind::String,
        "public",
        Some(opts_validator(VISIBILITY_OPTIONS)),
        "Filter based on visibility: public or private",
    ),
];

/// Fresh repository query with every qualifier declared and unset.
pub fn new_search_query() -> Result<Query, QueryError> {
    let qualifiers =
        Qualifiers::from_declarations(REPO_QUALIFIERS.iter().map(|decl| (decl.label, decl.build())))?;

    Ok(Query {
        keywords: Vec::new(),
        kind: KIND.to_string(),
        limit: DEFAULT_LIMIT,
        order: Parameter::new(
            "order",
            ValueKind::String,
            "desc",
            Some(opts_validator(ORDER_OPTIONS)),
        ),
        sort: Parameter::new(
            "sort",
            ValueKind::String,
            "best match",
            Some(opts_validator(SORT_OPTIONS)),
        ),
        qualifiers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declarations_build_a_unique_collection() {
        let query = new_search_query().expect("declarations are unique");

        assert_eq!(query.kind, "repositories");
        assert_eq!(query.limit, 30);
        assert_eq!(query.qualifiers.len(), REPO_QUALIFIERS.len());
        assert!(query.validate().is_ok());
        assert_eq!(query.query_string(), "", "nothing is set by default");
    }

    #[test]
    fn label_and_key_are_both_preserved() {
        let query = new_search_query().expect("declarations are unique");

        let visibility = query.qualifiers.get("Visibility").expect("declared");
        assert_eq!(visibility.key(), "is");
        assert_eq!(visibility.value(), "public");
        assert!(!visibility.is_set());
    }

    #[test]
    fn builds_end_to_end_query_string() {
        let mut query = new_search_query().expect("declarations are unique");
        query.keywords = vec!["cli".to_string(), "tool".to_string()];
        query.set_qualifier("language", "go").expect("language");
        query.set_qualifier("stars", ">100").expect("stars");

        assert_eq!(query.query_string(), "cli tool language:go stars:>100");
    }

    #[test]
    fn declared_validators_guard_each_qualifier() {
        let mut query = new_search_query().expect("declarations are unique");

        assert!(query.set_qualifier("archived", "maybe").is_err());
        assert!(query.set_qualifier("created", "last week").is_err());
        assert!(query.set_qualifier("fork", "sometimes").is_err());
        assert!(query.set_qualifier("in", "name,owner").is_err());
        assert!(query.set_qualifier("is", "internal").is_err());
        assert!(query.set_qualifier("sort", "best match").is_err());
        assert!(query.set_qualifier("order", "random").is_err());
        assert_eq!(query.query_string(), "");

        query.set_qualifier("archived", "false").expect("bool");
        query.set_qualifier("created", ">=2020-01-01").expect("date");
        query.set_qualifier("fork", "only").expect("fork");
        query.set_qualifier("in", "name,readme").expect("in");
        query.set_qualifier("is", "private").expect("visibility");
        query.set_qualifier("license", "apache-2.0").expect("free text");
        query.set_qualifier("sort", "updated").expect("sort");

        assert_eq!(
            query.query_string(),
            "archived:false created:>=2020-01-01 fork:only in:name,readme is:private license:apache-2.0 sort:updated"
        );
    }

    #[test]
    fn only_archived_and_mirror_are_bool_kind() {
        let bool_keys: Vec<&str> = REPO_QUALIFIERS
            .iter()
            .filter(|decl| decl.kind == ValueKind::Bool)
            .map(|decl| decl.key)
            .collect();

        assert_eq!(bool_keys, vec!["archived", "mirror"]);
    }
}
