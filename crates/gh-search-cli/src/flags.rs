use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches};
use search_core::{Query, QueryError, ValueKind};

use crate::repos::{QualifierDecl, REPO_QUALIFIERS};

/// Raw qualifier values collected from `--<key>` flags, in declaration order.
///
/// Values are not validated here; [`QualifierFlags::apply`] funnels them
/// through the same `set` path as any other caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualifierFlags {
    values: Vec<(&'static str, String)>,
}

impl QualifierFlags {
    pub fn apply(&self, query: &mut Query) -> Result<(), QueryError> {
        for (key, value) in &self.values {
            query.set_qualifier(key, value)?;
        }
        Ok(())
    }
}

fn qualifier_arg(decl: &QualifierDecl) -> Arg {
    let arg = Arg::new(decl.key)
        .long(decl.key)
        .help(decl.help)
        .action(ArgAction::Set)
        .value_parser(clap::value_parser!(String));

    match decl.kind {
        // Toggle-like: a bare `--archived` means `--archived=true`. An explicit
        // value must be attached with `=` so the next keyword is left alone.
        ValueKind::Bool => arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true")
            .value_name("true|false"),
        ValueKind::String => arg.value_name("VALUE"),
    }
}

impl FromArgMatches for QualifierFlags {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let values = REPO_QUALIFIERS
            .iter()
            .filter_map(|decl| {
                matches
                    .get_one::<String>(decl.key)
                    .map(|value| (decl.key, value.clone()))
            })
            .collect();
        Ok(Self { values })
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        *self = Self::from_arg_matches(matches)?;
        Ok(())
    }
}

impl Args for QualifierFlags {
    fn augment_args(cmd: Command) -> Command {
        REPO_QUALIFIERS
            .iter()
            .fold(cmd, |cmd, decl| cmd.arg(qualifier_arg(decl)))
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::repos::new_search_query;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        keywords: Vec<String>,
        #[command(flatten)]
        qualifiers: QualifierFlags,
    }

    #[test]
    fn every_declared_qualifier_gets_a_long_flag() {
        let cmd = <Harness as clap::CommandFactory>::command();

        for decl in REPO_QUALIFIERS {
            let arg = cmd
                .get_arguments()
                .find(|arg| arg.get_id().as_str() == decl.key)
                .unwrap_or_else(|| panic!("missing flag for {}", decl.key));
            assert_eq!(arg.get_long(), Some(decl.key));
        }
    }

    #[test]
    fn collects_only_flags_that_were_passed() {
        let harness = Harness::parse_from(["test", "--stars", ">100", "--language", "go"]);

        assert_eq!(
            harness.qualifiers.values,
            &[("language", "go".to_string()), ("stars", ">100".to_string())]
        );
    }

    #[test]
    fn bool_flags_are_toggle_like() {
        let bare = Harness::parse_from(["test", "--archived"]);
        assert_eq!(bare.qualifiers.values, [("archived", "true".to_string())]);

        let explicit = Harness::parse_from(["test", "--mirror=false"]);
        assert_eq!(explicit.qualifiers.values, [("mirror", "false".to_string())]);
    }

    #[test]
    fn bare_bool_flag_leaves_following_keyword_alone() {
        let harness = Harness::parse_from(["test", "--archived", "cli"]);

        assert_eq!(harness.keywords, ["cli"]);
        assert_eq!(harness.qualifiers.values, [("archived", "true".to_string())]);
    }

    #[test]
    fn string_flags_still_take_a_separate_value() {
        let harness = Harness::parse_from(["test", "--language", "go", "cli"]);

        assert_eq!(harness.keywords, ["cli"]);
        assert_eq!(harness.qualifiers.values, [("language", "go".to_string())]);
    }

    #[test]
    fn apply_routes_values_through_validation() {
        let harness = Harness::parse_from(["test", "--topic", "help wanted", "--is", "private"]);
        let mut query = new_search_query().expect("declarations are unique");

        harness
            .qualifiers
            .apply(&mut query)
            .expect("values should validate");

        assert_eq!(query.query_string(), "is:private topic:\"help wanted\"");
    }

    #[test]
    fn apply_surfaces_first_validation_error_verbatim() {
        let harness = Harness::parse_from(["test", "--stars", "many", "--archived=yes"]);
        let mut query = new_search_query().expect("declarations are unique");

        let err = harness
            .qualifiers
            .apply(&mut query)
            .expect_err("invalid values should fail");

        assert_eq!(err.to_string(), "yes is not a boolean value");
        assert_eq!(query.query_string(), "");
    }
}
