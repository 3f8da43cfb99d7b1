use comfy_table::{ContentArrangement, Table};
use yz_dice::{DieKind, Game};

pub fn run(game: Option<&str>) -> Result<(), String> {
    match game {
        Some(game) => show_game(super::parse_game(game)?),
        None => list_games(),
    }
    Ok(())
}

fn list_games() {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Game", "Dice", "Modifiers"]);

    for game in Game::ALL {
        let dice = game
            .die_kinds()
            .iter()
            .map(|k| k.key())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            game.key().to_string(),
            game.title().to_string(),
            dice,
            super::describe_rule(game.modifier_rule()),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} games", Game::ALL.len());
}

fn show_game(game: Game) {
    println!("  {} ({})", game.title(), game.key());
    println!("  Modifiers: {}", super::describe_rule(game.modifier_rule()));
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Die", "Role", "Denomination", "Faces", "Locked", "Successes"]);

    for kind in game.die_kinds() {
        let die = kind.die_type();
        let locked = die
            .locked_values
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        table.add_row(vec![
            kind.key().to_string(),
            die.role.to_string(),
            die.denomination.to_string(),
            die.faces.to_string(),
            if locked.is_empty() { "—".into() } else { locked },
            success_summary(*kind),
        ]);
    }

    println!("{table}");
}

/// Faces that score, as `face:successes` pairs.
fn success_summary(kind: DieKind) -> String {
    let die = kind.die_type();
    let scoring: Vec<String> = (1..=die.faces)
        .filter_map(|face| match die.successes_for(face) {
            0 => None,
            n => Some(format!("{face}:{n}")),
        })
        .collect();
    if scoring.is_empty() {
        "—".into()
    } else {
        scoring.join(" ")
    }
}
