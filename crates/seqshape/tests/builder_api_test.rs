//! Integration tests for the DiagramBuilder API

use std::fs;

use seqshape::{
    DiagramBuilder, SeqshapeError,
    config::AppConfig,
    draw::{ShapeBuffer, ShapeSink},
    syntax::{Diagram, EdgeStatement, FragmentStatement, SeparatorStatement},
};

fn sample_tree() -> Diagram {
    Diagram::new(vec![
        SeparatorStatement::divider("login").into(),
        EdgeStatement::chain("browser", &[("=>", "web"), ("=>", "db")])
            .expect("valid chain")
            .with_option("label", "pass-through")
            .with_option("note", "cached\nfor 5 min")
            .into(),
        FragmentStatement::new(
            "loop",
            vec![
                EdgeStatement::chain("web", &[("->>", "web")])
                    .expect("valid chain")
                    .into(),
            ],
        )
        .into(),
    ])
}

#[test]
fn test_build_and_render() {
    let builder = DiagramBuilder::default();
    let diagram = builder.build(&sample_tree()).expect("valid diagram");
    assert_eq!(diagram.lifeline_count(), 3);
    assert_eq!(diagram.messages().len(), 5);

    let mut buffer = ShapeBuffer::new();
    let extent = builder.render(&diagram, &mut buffer);

    // Every lifeline line ends at the returned extent.
    let lifeline_ends: Vec<_> = buffer
        .shapes()
        .take(2 * diagram.lifeline_count())
        .filter_map(|shape| shape.as_line())
        .map(|line| line.end().y())
        .collect();
    assert_eq!(lifeline_ends.len(), 3);
    assert!(lifeline_ends.iter().all(|y| *y == extent));
}

#[test]
fn test_render_tree_matches_two_step_render() {
    let builder = DiagramBuilder::default();
    let tree = sample_tree();

    let (buffer, extent) = builder.render_tree(&tree).expect("valid diagram");

    let diagram = builder.build(&tree).expect("valid diagram");
    let mut expected = ShapeBuffer::new();
    let expected_extent = builder.render(&diagram, &mut expected);

    assert_eq!(buffer, expected);
    assert_eq!(extent, expected_extent);
}

#[test]
fn test_builder_with_config() {
    let config = AppConfig::from_toml_str(
        r#"
        [layout]
        margin_x = 0.0
        header_width = 100.0
        lifeline_spacing = 150.0

        [palette]
        lifeline = "eeeeee"
        "#,
    )
    .expect("valid config");

    let builder = DiagramBuilder::new(config);
    let (buffer, _) = builder.render_tree(&sample_tree()).expect("valid diagram");

    let headers: Vec<_> = buffer
        .shapes()
        .filter_map(|shape| shape.as_rectangle())
        .filter(|rect| ["browser", "web", "db"].contains(&rect.text()))
        .collect();
    assert_eq!(headers.len(), 3);
    for (i, header) in headers.iter().enumerate() {
        assert_eq!(header.left_top().x(), 150.0 * i as f32);
        assert_eq!(header.size().width(), 100.0);
        assert_eq!(header.fill_color().map(|c| c.as_str()), Some("eeeeee"));
    }
}

#[test]
fn test_invalid_tree_returns_error() {
    let tree = Diagram::new(vec![FragmentStatement::new("alt", vec![]).into()]);

    let result = DiagramBuilder::default().render_tree(&tree);
    assert!(matches!(result, Err(SeqshapeError::Scan(_))));
}

#[test]
fn test_unreadable_config_is_config_error() {
    let dir = tempfile::tempdir().expect("temp dir");

    // The directory exists but cannot be read as a file.
    let err: SeqshapeError = AppConfig::load(dir.path()).unwrap_err().into();
    assert!(matches!(err, SeqshapeError::Config(_)));
    assert!(err.to_string().starts_with("Configuration error:"));
}

#[test]
fn test_export_persists_snapshot() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("diagram.toml");

    let mut buffer = ShapeBuffer::new();
    let extent = DiagramBuilder::default()
        .export(&sample_tree(), &mut buffer, &path)
        .expect("exported");
    assert!(extent > 0.0);

    let content = fs::read_to_string(&path).expect("snapshot written");
    assert!(content.contains("pass-through"));
    assert!(content.contains("loop"));
    assert_eq!(content.matches("[[shapes]]").count(), buffer.len());
}

#[test]
fn test_export_reports_sink_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing").join("diagram.toml");

    let mut buffer = ShapeBuffer::new();
    let err = DiagramBuilder::default()
        .export(&sample_tree(), &mut buffer, &path)
        .unwrap_err();
    assert!(matches!(err, SeqshapeError::Sink(_)));
}

#[test]
fn test_custom_sink() {
    #[derive(Default)]
    struct Counting {
        appended: usize,
        prepended: usize,
    }

    impl ShapeSink for Counting {
        fn append(&mut self, _shape: seqshape::draw::Shape) {
            self.appended += 1;
        }

        fn prepend(&mut self, _shape: seqshape::draw::Shape) {
            self.prepended += 1;
        }

        fn persist(
            &mut self,
            _path: &std::path::Path,
        ) -> Result<(), seqshape::draw::SinkError> {
            Ok(())
        }
    }

    let builder = DiagramBuilder::default();
    let diagram = builder.build(&sample_tree()).expect("valid diagram");
    let mut sink = Counting::default();
    builder.render(&diagram, &mut sink);

    assert_eq!(sink.prepended, 2 * diagram.lifeline_count());
    assert!(sink.appended > 0);
}
