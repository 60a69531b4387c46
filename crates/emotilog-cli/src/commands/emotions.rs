use emotilog_core::Config;
use serde::Serialize;

/// Category with its color resolved, as printed by `emotions --json`.
#[derive(Serialize)]
struct CategoryView<'a> {
    identifier: &'a str,
    display_name: &'a str,
    glyph: &'a str,
    color_code: &'a str,
    color: String,
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let table = config.category_table()?;
    let neutral = config.neutral_color();

    let views: Vec<CategoryView<'_>> = table
        .iter()
        .map(|c| CategoryView {
            identifier: c.emotion.as_str(),
            display_name: &c.display_name,
            glyph: &c.glyph,
            color_code: &c.color_code,
            color: c.color_or(neutral).to_string(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        for view in &views {
            println!(
                "{:<10} {} {:<10} {}",
                view.identifier, view.glyph, view.display_name, view.color
            );
        }
    }
    Ok(())
}
