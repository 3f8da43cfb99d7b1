pub mod games;
pub mod roll;

use yz_dice::{Game, ModifierRule};

/// Parse a game identifier into a CLI error message.
fn parse_game(game: &str) -> Result<Game, String> {
    game.parse::<Game>().map_err(|e| e.to_string())
}

/// Short description of how a game handles difficulty.
fn describe_rule(rule: ModifierRule) -> String {
    match rule {
        ModifierRule::Ladder => "die size ladder".into(),
        ModifierRule::Advantage => "advantage / disadvantage".into(),
        ModifierRule::Paired { negative } => format!("skill dice, {negative} dice below zero"),
        ModifierRule::SkillFloor => "skill dice, at least one".into(),
    }
}
