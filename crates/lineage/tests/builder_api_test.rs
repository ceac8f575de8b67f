use float_cmp::assert_approx_eq;

use lineage::{
    LineageError, TreeBuilder,
    config::{AppConfig, LabelConfig, LayoutConfig, StyleConfig},
    identifier::MemberId,
    semantic::{FamilyTree, RelationKind},
};

const FAMILY: &str = r#"
canvas 1000 700;

member 1 "Grandfather A";
member 2 "Grandmother A";
member 3 "Father" [tag="patriline"];
member 4 "Mother";
member 5 "Sir Galahad of the Silvermoon Bastion";
member 6 "Uncle";

spouse 1 2;
child 1 3;
child 2 3;
spouse 3 4;
sibling 4 6;
child 3 5;
child 4 5;
"#;

fn id(value: u64) -> MemberId {
    MemberId::new(value)
}

#[test]
fn reference_family_generations_and_positions() {
    let builder = TreeBuilder::default();
    let tree = builder.parse(FAMILY).expect("reference family parses");

    let generations = builder.infer_generations(&tree);
    for (member, generation) in [(1, 0), (2, 0), (3, 1), (4, 1), (6, 1), (5, 2)] {
        assert_eq!(generations.get(id(member)), Some(generation));
    }

    let layout = builder.layout(&tree);
    for (member, x) in [(1, 140.0), (2, 260.0), (3, 200.0), (4, 320.0), (6, 440.0), (5, 260.0)] {
        assert_approx_eq!(f32, layout.placement(id(member)).unwrap().position().x(), x);
    }
}

#[test]
fn render_is_deterministic() {
    let builder = TreeBuilder::default();
    let tree = builder.parse(FAMILY).unwrap();

    let first = builder.render_svg(&tree);
    let second = builder.render_svg(&tree);
    assert_eq!(first, second);

    let reparsed = builder.parse(FAMILY).unwrap();
    assert_eq!(first, builder.render_svg(&reparsed));
}

#[test]
fn render_shortcut_matches_default_builder() {
    let tree = TreeBuilder::default().parse(FAMILY).unwrap();
    assert_eq!(lineage::render(&tree), TreeBuilder::default().render_svg(&tree));
}

#[test]
fn write_svg_matches_render_svg() {
    let builder = TreeBuilder::default();
    let tree = builder.parse(FAMILY).unwrap();

    let mut buffer = Vec::new();
    builder.write_svg(&tree, &mut buffer).unwrap();
    let written = String::from_utf8(buffer).unwrap();

    assert!(written.contains(&builder.render_svg(&tree)));
}

#[test]
fn svg_structure() {
    let builder = TreeBuilder::default();
    let tree = builder.parse(FAMILY).unwrap();
    let svg = builder.render_svg(&tree);

    assert!(svg.contains("width=\"1000\""));
    assert!(svg.contains("height=\"700\""));
    assert_eq!(svg.matches("<rect").count(), 6);
    assert_eq!(svg.matches("<tspan").count(), 1 + 1 + 1 + 1 + 3 + 1 + 1);
    assert!(svg.contains("class=\"patriline\""));
    assert!(svg.contains("Sir Galahad of"));
    assert!(svg.contains("Bastion"));
}

#[test]
fn empty_name_renders_box_without_text() {
    let mut tree = FamilyTree::default();
    tree.add_member(id(1), "", None);

    let svg = lineage::render(&tree);
    assert_eq!(svg.matches("<rect").count(), 1);
    assert!(!svg.contains("<text"));
}

#[test]
fn custom_configuration_changes_spacing() {
    let config = AppConfig::new(
        LayoutConfig::default().with_min_step(200.0),
        StyleConfig::default(),
        LabelConfig::default(),
    );
    let builder = TreeBuilder::new(config).unwrap();

    let mut tree = FamilyTree::default();
    tree.add_member(id(1), "A", None);
    tree.add_member(id(2), "B", None);

    let layout = builder.layout(&tree);
    assert_approx_eq!(f32, layout.placement(id(2)).unwrap().position().x(), 300.0);
}

#[test]
fn narrow_wrap_width_grows_boxes() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        StyleConfig::default(),
        LabelConfig::default().with_max_chars_per_line(4),
    );
    let builder = TreeBuilder::new(config).unwrap();

    let mut tree = FamilyTree::default();
    tree.add_member(id(1), "Anna Maria Lisa Rose", None);

    let layout = builder.layout(&tree);
    // Four lines of 14 plus 10 padding
    assert_approx_eq!(f32, layout.placement(id(1)).unwrap().box_height(), 66.0);
}

#[test]
fn invalid_configuration_is_rejected() {
    let config = AppConfig::new(
        LayoutConfig::default().with_min_step(0.0),
        StyleConfig::default(),
        LabelConfig::default(),
    );
    assert!(matches!(TreeBuilder::new(config), Err(LineageError::Config(_))));

    let config = AppConfig::new(
        LayoutConfig::default().with_max_passes(0),
        StyleConfig::default(),
        LabelConfig::default(),
    );
    assert!(matches!(TreeBuilder::new(config), Err(LineageError::Config(_))));

    let style: StyleConfig = toml::from_str(r#"spouse_color = "nope""#).unwrap();
    let config = AppConfig::new(LayoutConfig::default(), style, LabelConfig::default());
    assert!(matches!(TreeBuilder::new(config), Err(LineageError::Config(_))));
}

#[test]
fn parse_errors_keep_source() {
    let source = "member 1 \"A\" [colour=\"red\"];";
    let err = TreeBuilder::default().parse(source).unwrap_err();

    match err {
        LineageError::Parse { err, src } => {
            assert_eq!(src, source);
            assert_eq!(err.diagnostics().len(), 1);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn relations_to_unknown_members_are_not_drawn() {
    let mut tree = FamilyTree::default();
    tree.add_member(id(1), "Parent", None);
    tree.add_relation(id(1), id(77), RelationKind::Child);
    tree.add_relation(id(77), id(88), RelationKind::Spouse);

    let builder = TreeBuilder::default();
    let generations = builder.infer_generations(&tree);
    assert_eq!(generations.get(id(1)), Some(0));
    assert_eq!(generations.get(id(77)), Some(1));
    assert_eq!(generations.get(id(88)), Some(1));

    let svg = builder.render_svg(&tree);
    assert!(!svg.contains("data-id=\"77\""));
    assert!(!svg.contains("stroke-dasharray"));
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn tree_strategy() -> impl Strategy<Value = FamilyTree> {
        let kind = prop::sample::select(vec![
            RelationKind::Child,
            RelationKind::Spouse,
            RelationKind::Sibling,
        ]);
        let names = prop::collection::vec("[A-Za-z]{1,12}( [A-Za-z]{1,12}){0,3}", 1..10);
        names.prop_flat_map(move |names| {
            let count = names.len() as u64;
            prop::collection::vec((0..count, 0..count, kind.clone()), 0..12).prop_map(
                move |relations| {
                    let mut tree = FamilyTree::default();
                    for (value, name) in names.iter().enumerate() {
                        tree.add_member(MemberId::new(value as u64), name, None);
                    }
                    for (from, to, kind) in relations {
                        tree.add_relation(MemberId::new(from), MemberId::new(to), kind);
                    }
                    tree
                },
            )
        })
    }

    proptest! {
        #[test]
        fn rendering_is_idempotent(tree in tree_strategy()) {
            let builder = TreeBuilder::default();
            prop_assert_eq!(builder.render_svg(&tree), builder.render_svg(&tree));
        }

        #[test]
        fn every_member_gets_a_box(tree in tree_strategy()) {
            let svg = lineage::render(&tree);
            prop_assert_eq!(svg.matches("<rect").count(), tree.members_count());
            for member in tree.members() {
                let needle = format!("data-id=\"{}\"", member.id());
                prop_assert!(svg.contains(&needle));
            }
        }
    }
}
