//! Behavioural properties of the field tree validator.

use fieldset_domain::{ConfigValue, Diagnostic, Rule, Severity};
use fieldset_schema::{ValidationFailure, Validator, ValidatorOptions, validate};
use fieldset_testkit::builders::{
    FieldBuilder, array, checkbox, group, json, labelled_tab, list, named_tab, row, tabs, text,
};
use fieldset_testkit::fixtures::{BLOG_POST, LAYOUT, MIXED_ERRORS, load_fixture};
use proptest::prelude::*;
use serde_json::json;
use std::error::Error;

type TestResult = Result<(), Box<dyn Error>>;

fn failure_of(input: &ConfigValue) -> Result<ValidationFailure, Box<dyn Error>> {
    Ok(validate(input)
        .err()
        .ok_or_else(|| std::io::Error::other("expected validation to fail"))?)
}

fn located(diagnostics: &[Diagnostic]) -> Vec<(String, Rule)> {
    diagnostics
        .iter()
        .map(|diagnostic| (diagnostic.path.to_string(), diagnostic.rule))
        .collect()
}

// -----------------------------------------------------------------------------
// Conditional gating
// -----------------------------------------------------------------------------

#[test]
fn max_rows_is_forbidden_without_has_many() -> TestResult {
    for has_many in [None, Some(false)] {
        let mut field = FieldBuilder::new("number").name("count").attr("maxRows", 5_i64);
        if let Some(flag) = has_many {
            field = field.attr("hasMany", flag);
        }
        let failure = failure_of(&list(vec![field.build()]))?;
        assert_eq!(
            located(&failure.errors),
            [("fields[0].maxRows".to_string(), Rule::ForbiddenAttribute)]
        );
        assert_eq!(
            failure.errors.first().and_then(|error| error.attribute.as_deref()),
            Some("maxRows")
        );
    }
    Ok(())
}

#[test]
fn max_rows_is_accepted_with_has_many_and_min_rows_stays_absent() -> TestResult {
    let field = FieldBuilder::new("number")
        .name("count")
        .attr("hasMany", true)
        .attr("maxRows", 5_i64)
        .build();
    let validated = validate(&list(vec![field]))?;
    let node = validated
        .fields
        .first()
        .ok_or_else(|| std::io::Error::other("missing node"))?;
    assert_eq!(node.attribute("maxRows"), Some(&ConfigValue::from(5_i64)));
    assert!(node.attribute("minRows").is_none());
    assert!(validated.warnings.is_empty());
    Ok(())
}

// -----------------------------------------------------------------------------
// Deprecated aliases
// -----------------------------------------------------------------------------

#[test]
fn relationship_max_warns_once_and_is_kept() -> TestResult {
    let field = FieldBuilder::new("relationship")
        .name("authors")
        .attr("relationTo", "users")
        .attr("hasMany", true)
        .attr("max", 3_i64)
        .build();
    let validated = validate(&list(vec![field]))?;

    assert_eq!(validated.warnings.len(), 1);
    let warning = validated
        .warnings
        .first()
        .ok_or_else(|| std::io::Error::other("missing warning"))?;
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.rule, Rule::DeprecatedAttribute);
    assert_eq!(warning.attribute.as_deref(), Some("max"));
    assert!(warning.message.contains("maxRows"));

    let node = validated
        .fields
        .first()
        .ok_or_else(|| std::io::Error::other("missing node"))?;
    assert_eq!(node.attribute("max"), Some(&ConfigValue::from(3_i64)));
    assert!(node.attribute("maxRows").is_none());
    Ok(())
}

#[test]
fn relation_targets_may_be_an_empty_list() -> TestResult {
    let document = list(vec![json(json!({
        "type": "relationship",
        "name": "related",
        "relationTo": []
    }))]);
    validate(&document)?;

    let failure = failure_of(&list(vec![json(json!({
        "type": "relationship",
        "name": "related",
        "relationTo": ["posts", 3]
    }))]))?;
    assert_eq!(
        located(&failure.errors),
        [("fields[0].relationTo[1]".to_string(), Rule::TypeMismatch)]
    );
    Ok(())
}

#[test]
fn strict_deprecations_turn_the_warning_into_an_error() -> TestResult {
    let field = FieldBuilder::new("relationship")
        .name("authors")
        .attr("hasMany", true)
        .attr("min", 1_i64)
        .build();
    let validator = Validator::new(ValidatorOptions::default().with_strict_deprecations(true));
    let failure = validator
        .validate(&list(vec![field]))
        .err()
        .ok_or_else(|| std::io::Error::other("expected validation to fail"))?;
    assert_eq!(
        located(&failure.errors),
        [("fields[0].min".to_string(), Rule::DeprecatedAttribute)]
    );
    assert!(failure.warnings.is_empty());
    Ok(())
}

// -----------------------------------------------------------------------------
// Recursion
// -----------------------------------------------------------------------------

#[test]
fn three_levels_validate() -> TestResult {
    let document = list(vec![array(
        "rows",
        vec![group("meta", vec![text("title")])],
    )]);
    let validated = validate(&document)?;
    assert_eq!(validated.nodes_visited, 3);
    Ok(())
}

#[test]
fn innermost_error_carries_every_level() -> TestResult {
    let document = list(vec![array(
        "rows",
        vec![group(
            "meta",
            vec![FieldBuilder::new("text").build()],
        )],
    )]);
    let failure = failure_of(&document)?;
    assert_eq!(
        located(&failure.errors),
        [(
            "fields[0].fields[0].fields[0].name".to_string(),
            Rule::MissingAttribute
        )]
    );
    Ok(())
}

// -----------------------------------------------------------------------------
// Closed attribute set and discriminants
// -----------------------------------------------------------------------------

#[test]
fn checkbox_rejects_options() -> TestResult {
    let field = FieldBuilder::new("checkbox")
        .name("agree")
        .options(&["yes"])
        .build();
    let failure = failure_of(&list(vec![field]))?;
    let error = failure
        .first_error()
        .ok_or_else(|| std::io::Error::other("missing error"))?;
    assert_eq!(error.rule, Rule::DisallowedAttribute);
    assert_eq!(error.attribute.as_deref(), Some("options"));
    assert!(error.message.contains("options"));
    assert!(error.message.contains("checkbox"));
    Ok(())
}

#[test]
fn unknown_type_does_not_stop_siblings() -> TestResult {
    let document = list(vec![
        FieldBuilder::new("unknown").name("x").attr("bogus", true).build(),
        FieldBuilder::new("text").attr("colour", "red").build(),
    ]);
    let failure = failure_of(&document)?;
    assert_eq!(
        located(&failure.errors),
        [
            ("fields[0].type".to_string(), Rule::UnknownType),
            ("fields[1].colour".to_string(), Rule::DisallowedAttribute),
            ("fields[1].name".to_string(), Rule::MissingAttribute),
        ]
    );
    let unknown = failure
        .first_error()
        .ok_or_else(|| std::io::Error::other("missing error"))?;
    assert!(unknown.message.contains("\"unknown\""));
    assert!(unknown.message.contains("checkbox"));
    assert_eq!(failure.nodes_visited, 2);
    Ok(())
}

// -----------------------------------------------------------------------------
// Tabs
// -----------------------------------------------------------------------------

#[test]
fn tab_rules() -> TestResult {
    let document = list(vec![tabs(vec![
        labelled_tab("Content", vec![text("headline")]),
        FieldBuilder::untyped().fields(vec![text("a")]).build(),
        FieldBuilder::untyped()
            .label("Meta")
            .attr("localized", true)
            .attr("interfaceName", "Meta")
            .fields(vec![])
            .build(),
    ])]);
    let failure = failure_of(&document)?;
    assert_eq!(
        located(&failure.errors),
        [
            ("fields[0].tabs[1].label".to_string(), Rule::MissingAttribute),
            (
                "fields[0].tabs[2].interfaceName".to_string(),
                Rule::ForbiddenAttribute
            ),
            ("fields[0].tabs[2].name".to_string(), Rule::MissingAttribute),
        ]
    );
    Ok(())
}

#[test]
fn descriptor_lists_report_in_pre_order() -> TestResult {
    let document = list(vec![
        tabs(vec![
            labelled_tab("Content", vec![FieldBuilder::new("text").build()]),
            FieldBuilder::untyped().fields(vec![]).build(),
        ]),
        json(json!({
            "type": "blocks",
            "name": "layout",
            "blocks": [
                { "slug": "hero", "fields": [{ "type": "text" }] },
                { "fields": [{ "type": "nope" }] }
            ]
        })),
    ]);
    let failure = failure_of(&document)?;
    assert_eq!(
        located(&failure.errors),
        [
            (
                "fields[0].tabs[0].fields[0].name".to_string(),
                Rule::MissingAttribute
            ),
            ("fields[0].tabs[1].label".to_string(), Rule::MissingAttribute),
            (
                "fields[1].blocks[0].fields[0].name".to_string(),
                Rule::MissingAttribute
            ),
            ("fields[1].blocks[1].slug".to_string(), Rule::MissingAttribute),
            (
                "fields[1].blocks[1].fields[0].type".to_string(),
                Rule::UnknownType
            ),
        ]
    );
    assert_eq!(failure.nodes_visited, 5);
    Ok(())
}

#[test]
fn tab_with_empty_name_is_present_but_invalid() -> TestResult {
    let document = list(vec![tabs(vec![named_tab("", vec![text("a")])])]);
    let failure = failure_of(&document)?;
    assert_eq!(
        located(&failure.errors),
        [("fields[0].tabs[0].name".to_string(), Rule::InvalidValue)]
    );
    Ok(())
}

#[test]
fn tabs_reject_fields_and_localized() -> TestResult {
    let document = list(vec![FieldBuilder::new("tabs")
        .attr("tabs", vec![named_tab("a", vec![])])
        .attr("localized", true)
        .fields(vec![])
        .build()]);
    let failure = failure_of(&document)?;
    assert_eq!(
        located(&failure.errors),
        [
            ("fields[0].fields".to_string(), Rule::ForbiddenAttribute),
            ("fields[0].localized".to_string(), Rule::ForbiddenAttribute),
        ]
    );
    Ok(())
}

// -----------------------------------------------------------------------------
// Defaults and idempotence
// -----------------------------------------------------------------------------

#[test]
fn defaults_are_injected_for_absent_attributes() -> TestResult {
    let validated = validate(&list(vec![checkbox("agree")]))?;
    let node = validated
        .fields
        .first()
        .ok_or_else(|| std::io::Error::other("missing node"))?;
    for flag in ["hidden", "index", "localized", "required", "unique"] {
        assert_eq!(node.attribute(flag), Some(&ConfigValue::Bool(false)), "{flag}");
    }
    let hooks = node
        .attribute("hooks")
        .and_then(ConfigValue::as_object)
        .ok_or_else(|| std::io::Error::other("missing hooks"))?;
    assert_eq!(hooks.get("beforeChange"), Some(&ConfigValue::Array(Vec::new())));
    assert!(node.attribute("access").is_some_and(ConfigValue::is_object));
    Ok(())
}

#[test]
fn validation_is_idempotent() -> TestResult {
    for fixture in [BLOG_POST, LAYOUT] {
        let first = validate(&load_fixture(fixture)?)?;
        let warnings = first.warnings.clone();
        let once = first.into_value();
        let second = validate(&once)?;
        assert_eq!(second.warnings, warnings, "{fixture}");
        assert_eq!(second.into_value(), once, "{fixture}");
    }

    let deprecated = list(vec![json(json!({
        "type": "relationship",
        "name": "authors",
        "hasMany": true,
        "max": 3
    }))]);
    let first = validate(&deprecated)?;
    let second = validate(&first.clone().into_value())?;
    assert_eq!(second.warnings, first.warnings);
    Ok(())
}

// -----------------------------------------------------------------------------
// Fixtures
// -----------------------------------------------------------------------------

#[test]
fn blog_post_fixture_is_valid() -> TestResult {
    let validated = validate(&load_fixture(BLOG_POST)?)?;
    assert_eq!(validated.len(), 15);
    assert_eq!(validated.nodes_visited, 22);
    assert!(validated.warnings.is_empty());
    Ok(())
}

#[test]
fn layout_fixture_counts_layout_nodes() -> TestResult {
    let validated = validate(&load_fixture(LAYOUT)?)?;
    assert_eq!(validated.nodes_visited, 8);
    Ok(())
}

#[test]
fn mixed_errors_fixture_reports_everything_in_order() -> TestResult {
    let failure = failure_of(&load_fixture(MIXED_ERRORS)?)?;
    assert_eq!(
        located(&failure.errors),
        [
            ("fields[0].colour".to_string(), Rule::DisallowedAttribute),
            ("fields[1].maxRows".to_string(), Rule::ForbiddenAttribute),
            ("fields[2].type".to_string(), Rule::UnknownType),
            (
                "fields[4].fields[0].fields[0].name".to_string(),
                Rule::MissingAttribute
            ),
            ("fields[5].options".to_string(), Rule::DisallowedAttribute),
        ]
    );
    assert_eq!(
        located(&failure.warnings),
        [("fields[3].max".to_string(), Rule::DeprecatedAttribute)]
    );
    assert_eq!(failure.nodes_visited, 8);
    Ok(())
}

#[test]
fn layout_rows_accept_children() -> TestResult {
    let validated = validate(&list(vec![row(vec![text("first"), text("last")])]))?;
    let node = validated
        .fields
        .first()
        .ok_or_else(|| std::io::Error::other("missing node"))?;
    assert!(node.name().is_none());
    assert_eq!(
        node.attribute("fields")
            .and_then(ConfigValue::as_array)
            .map(<[ConfigValue]>::len),
        Some(2)
    );
    Ok(())
}

// -----------------------------------------------------------------------------
// Node count and order over generated trees
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Container {
    Group,
    Array,
    Row,
}

#[derive(Debug, Clone, Copy)]
enum Descriptor {
    Tabs,
    Blocks,
}

impl Descriptor {
    const fn list_key(self) -> &'static str {
        match self {
            Self::Tabs => "tabs",
            Self::Blocks => "blocks",
        }
    }

    /// Attribute reported missing on an undescribed entry.
    const fn required_key(self) -> &'static str {
        match self {
            Self::Tabs => "label",
            Self::Blocks => "slug",
        }
    }

    fn entry(self, described: bool, children: Vec<ConfigValue>) -> ConfigValue {
        let entry = FieldBuilder::untyped().fields(children);
        match (self, described) {
            (Self::Tabs, true) => entry.label("Tab").build(),
            (Self::Blocks, true) => entry.attr("slug", "block").build(),
            (_, false) => entry.build(),
        }
    }
}

#[derive(Debug, Clone)]
enum Tree {
    Leaf { named: bool },
    Node { kind: Container, children: Vec<Tree> },
    Described { kind: Descriptor, entries: Vec<(bool, Vec<Tree>)> },
}

impl Tree {
    fn to_value(&self) -> ConfigValue {
        match self {
            Self::Leaf { named: true } => text("leaf"),
            Self::Leaf { named: false } => FieldBuilder::new("text").build(),
            Self::Node { kind, children } => {
                let children = children.iter().map(Self::to_value).collect();
                match kind {
                    Container::Group => group("group", children),
                    Container::Array => array("array", children),
                    Container::Row => row(children),
                }
            },
            Self::Described { kind, entries } => {
                let entries: Vec<ConfigValue> = entries
                    .iter()
                    .map(|(described, children)| {
                        kind.entry(*described, children.iter().map(Self::to_value).collect())
                    })
                    .collect();
                match kind {
                    Descriptor::Tabs => tabs(entries),
                    Descriptor::Blocks => FieldBuilder::new("blocks")
                        .name("blocks")
                        .attr("blocks", entries)
                        .build(),
                }
            },
        }
    }

    fn count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Node { children, .. } => 1 + children.iter().map(Self::count).sum::<usize>(),
            Self::Described { entries, .. } => {
                1 + entries
                    .iter()
                    .flat_map(|(_, children)| children)
                    .map(Self::count)
                    .sum::<usize>()
            },
        }
    }

    fn expected_errors(&self, path: &str, out: &mut Vec<String>) {
        match self {
            Self::Leaf { named: true } => {},
            Self::Leaf { named: false } => out.push(format!("{path}.name")),
            Self::Node { children, .. } => {
                for (index, child) in children.iter().enumerate() {
                    child.expected_errors(&format!("{path}.fields[{index}]"), out);
                }
            },
            Self::Described { kind, entries } => {
                for (index, (described, children)) in entries.iter().enumerate() {
                    let entry_path = format!("{path}.{}[{index}]", kind.list_key());
                    if !described {
                        out.push(format!("{entry_path}.{}", kind.required_key()));
                    }
                    for (child_index, child) in children.iter().enumerate() {
                        child.expected_errors(&format!("{entry_path}.fields[{child_index}]"), out);
                    }
                }
            },
        }
    }
}

fn tree() -> impl Strategy<Value = Tree> {
    let leaf = any::<bool>().prop_map(|named| Tree::Leaf { named });
    leaf.prop_recursive(4, 48, 4, |inner| {
        let container = (
            prop_oneof![
                Just(Container::Group),
                Just(Container::Array),
                Just(Container::Row)
            ],
            prop::collection::vec(inner.clone(), 0..4),
        )
            .prop_map(|(kind, children)| Tree::Node { kind, children });
        let described = (
            prop_oneof![Just(Descriptor::Tabs), Just(Descriptor::Blocks)],
            prop::collection::vec((any::<bool>(), prop::collection::vec(inner, 0..3)), 0..3),
        )
            .prop_map(|(kind, entries)| Tree::Described { kind, entries });
        prop_oneof![container, described]
    })
}

proptest! {
    #[test]
    fn visits_every_node_and_reports_in_pre_order(roots in prop::collection::vec(tree(), 0..4)) {
        let document = list(roots.iter().map(Tree::to_value).collect());
        let expected_count: usize = roots.iter().map(Tree::count).sum();
        let mut expected_errors = Vec::new();
        for (index, root) in roots.iter().enumerate() {
            root.expected_errors(&format!("fields[{index}]"), &mut expected_errors);
        }

        let first = validate(&document);
        let second = validate(&document);
        prop_assert_eq!(&first, &second);

        match first {
            Ok(validated) => {
                prop_assert!(expected_errors.is_empty());
                prop_assert_eq!(validated.nodes_visited, expected_count);
            },
            Err(failure) => {
                let paths: Vec<String> = failure
                    .errors
                    .iter()
                    .map(|error| error.path.to_string())
                    .collect();
                prop_assert_eq!(paths, expected_errors);
                prop_assert_eq!(failure.nodes_visited, expected_count);
            },
        }
    }
}
