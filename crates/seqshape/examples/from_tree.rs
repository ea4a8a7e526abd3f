//! Builds a small diagram with the syntax tree API, lays it out and writes a
//! shape snapshot.
//!
//! ```text
//! cargo run --example from_tree -- [output.toml] [config.toml]
//! ```

use std::{env, process};

use log::{LevelFilter, error, info};

use seqshape::{
    DiagramBuilder, SeqshapeError,
    config::AppConfig,
    draw::{Shape, ShapeBuffer},
    syntax::{Diagram, EdgeStatement, FragmentStatement, NodeStatement, SeparatorStatement},
};

fn tree() -> Result<Diagram, SeqshapeError> {
    Ok(Diagram::new(vec![
        NodeStatement::new("browser").into(),
        NodeStatement::new("web").into(),
        NodeStatement::new("db").into(),
        SeparatorStatement::divider("Sign in").into(),
        EdgeStatement::chain("browser", &[("=>", "web")])?
            .with_option("label", "POST /login")
            .with_block(vec![
                EdgeStatement::chain("web", &[("=>", "db")])?
                    .with_option("label", "SELECT user")
                    .with_option("note", "indexed\nby email")
                    .into(),
            ])
            .into(),
        SeparatorStatement::delay("later").into(),
        FragmentStatement::new(
            "loop",
            vec![
                EdgeStatement::chain("browser", &[("->>", "web")])?
                    .with_option("label", "poll")
                    .into(),
                FragmentStatement::new(
                    "alt",
                    vec![
                        EdgeStatement::chain("web", &[("-->", "web")])?
                            .with_option("leftnote", "refresh")
                            .into(),
                    ],
                )
                .into(),
            ],
        )
        .into(),
    ]))
}

fn run(output: &str, config: Option<&str>) -> Result<(), SeqshapeError> {
    let config = match config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let builder = DiagramBuilder::new(config);

    let mut buffer = ShapeBuffer::new();
    let extent = builder.export(&tree()?, &mut buffer, output)?;

    let (rectangles, lines) = buffer
        .shapes()
        .fold((0, 0), |(rectangles, lines), shape| match shape {
            Shape::Rectangle(_) => (rectangles + 1, lines),
            Shape::Line(_) => (rectangles, lines + 1),
        });
    println!("{rectangles} rectangles, {lines} lines, extent {extent}, written to {output}");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let output = args.first().map_or("diagram.toml", String::as_str);
    let config = args.get(1).map(String::as_str);

    info!(output, config:?; "Rendering example diagram");

    if let Err(err) = run(output, config) {
        error!("{err}");
        process::exit(1);
    }
}
