use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use yz_dice::{
    DicePool, DieKind, DieResult, DieRole, Game, GameContext, ResultState, RollConfig,
    RollReport, TermReport,
};

/// Options of `yz roll`.
pub struct RollArgs {
    pub game: String,
    pub dice: Vec<String>,
    pub modify: i32,
    pub push: u32,
    pub max_push: u32,
    pub seed: Option<u64>,
    pub name: Option<String>,
    pub json: bool,
}

pub fn run(args: &RollArgs) -> Result<(), String> {
    let game = super::parse_game(&args.game)?;
    let mut config = RollConfig::default()
        .with_game(game)
        .with_max_push(args.max_push);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let context = config.context();

    let dice = args
        .dice
        .iter()
        .map(|spec| parse_dice(&context, spec))
        .collect::<Result<Vec<_>, _>>()?;
    let mut pool = DicePool::from_quantities(context, &dice, config.max_push)
        .map_err(|e| e.to_string())?;
    if let Some(name) = &args.name {
        pool = pool.with_name(name.clone());
    }

    let mut rng = config.roller();
    pool.modify(args.modify, &mut rng)
        .map_err(|e| format!("cannot apply modifier {}: {e}", args.modify))?;
    pool.evaluate(&mut rng);
    for _ in 0..args.push {
        if !pool.push(&mut rng) {
            break;
        }
    }
    tracing::info!(
        formula = %pool,
        successes = pool.successes(),
        pushes = pool.push_count(),
        "rolled"
    );

    let report = pool.report(&config.dice_sorting);
    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        print_report(&report, args.push);
    }
    Ok(())
}

/// Parse `KIND=N`, where KIND is a die type key or a denomination of the game.
fn parse_dice(context: &GameContext, spec: &str) -> Result<(DieKind, u32), String> {
    let (kind, quantity) = spec
        .split_once('=')
        .ok_or_else(|| format!("invalid dice \"{spec}\": expected KIND=N"))?;
    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid dice \"{spec}\": \"{quantity}\" is not a number"))?;
    let kind = match kind.parse::<DieKind>() {
        Ok(key) => context
            .require_die(key)
            .or_else(|err| context.die_by_denomination(kind).map_err(|_| err)),
        Err(_) => context.die_by_denomination(kind),
    }
    .map_err(|e| e.to_string())?;
    Ok((kind, quantity))
}

fn print_report(report: &RollReport, requested_pushes: u32) {
    let title = report.name.as_deref().unwrap_or("Roll");
    println!(
        "  {} {}",
        title.bold(),
        format!("({}: {})", report.game.title(), report.formula).dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Dice", "Role", "Results", "Successes"]);
    for term in &report.terms {
        let label = match &term.flavor {
            Some(flavor) => format!("{}d{} {flavor}", term.number, term.faces),
            None => format!("{}d{}", term.number, term.faces),
        };
        table.add_row(vec![
            label,
            term.role.to_string(),
            render_rows(term),
            term.successes.to_string(),
        ]);
    }
    println!("{table}");
    println!();

    let stats = &report.stats;
    let successes = stats.successes.to_string();
    println!(
        "  Successes: {}",
        if stats.successes > 0 {
            successes.green().bold()
        } else {
            successes.red().bold()
        }
    );
    println!("  Banes: {}", stats.banes);
    for (label, value) in game_counters(report) {
        println!("  {label}: {value}");
    }

    let pushes = match stats.push_count {
        0 => "not pushed".to_string(),
        1 => "pushed once".to_string(),
        n => format!("pushed {n} times"),
    };
    println!("  {}", pushes.dimmed());
    if stats.push_count < requested_pushes {
        println!("  {}", "no further push possible".dimmed());
    }
}

/// One line per push cycle, replaced results in parentheses.
fn render_rows(term: &TermReport) -> String {
    term.matrix
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Some(result) => render_result(result, term.role),
                    None => "·".dimmed().to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_result(result: &DieResult, role: DieRole) -> String {
    let text = result.to_string();
    match result.state {
        ResultState::Active if result.value >= 6 && role != DieRole::Location => {
            text.green().to_string()
        }
        ResultState::Active if result.value == 1 && role.is_banable() => text.red().to_string(),
        ResultState::Active => text,
        _ => text.dimmed().to_string(),
    }
}

fn game_counters(report: &RollReport) -> Vec<(&'static str, String)> {
    let stats = &report.stats;
    match report.game {
        Game::MutantYearZero | Game::ForbiddenLands => vec![
            ("Attribute trauma", stats.attribute_trauma.to_string()),
            ("Gear damage", stats.gear_damage.to_string()),
        ],
        Game::Alien => vec![
            ("Stress dice", stats.stress.to_string()),
            ("Panic", stats.panic.to_string()),
        ],
        Game::Twilight2000 => {
            let locations = if stats.hit_locations.is_empty() {
                "—".to_string()
            } else {
                stats
                    .hit_locations
                    .iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            vec![
                ("Ammo spent", stats.ammo_spent.to_string()),
                ("Hits", stats.hits.to_string()),
                ("Jam count", stats.jam_count.to_string()),
                ("Jammed", if stats.jammed { "yes" } else { "no" }.to_string()),
                ("Hit locations", locations),
            ]
        }
        Game::Tales | Game::Coriolis | Game::Vaesen | Game::BladeRunner => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_by_key_or_denomination() {
        let ctx = GameContext::new(Game::MutantYearZero);
        assert_eq!(parse_dice(&ctx, "base=3").unwrap(), (DieKind::Base, 3));
        assert_eq!(parse_dice(&ctx, "s=2").unwrap(), (DieKind::Skill, 2));
        let t2k = GameContext::new(Game::Twilight2000);
        assert_eq!(parse_dice(&t2k, "b=1").unwrap(), (DieKind::TwilightD10, 1));
        assert_eq!(parse_dice(&t2k, "8=1").unwrap(), (DieKind::TwilightD8, 1));
    }

    #[test]
    fn denomination_wins_over_foreign_key() {
        let ctx = GameContext::new(Game::MutantYearZero);
        assert_eq!(parse_dice(&ctx, "b=3").unwrap(), (DieKind::Base, 3));
        assert_eq!(parse_dice(&ctx, "g=1").unwrap(), (DieKind::Gear, 1));
    }

    #[test]
    fn parse_rejects_malformed() {
        let ctx = GameContext::new(Game::Alien);
        assert!(parse_dice(&ctx, "skill3").unwrap_err().contains("KIND=N"));
        assert!(parse_dice(&ctx, "skill=x").unwrap_err().contains("not a number"));
        assert!(parse_dice(&ctx, "base=1").unwrap_err().contains("unknown die type"));
        assert!(parse_dice(&ctx, "q=1").unwrap_err().contains("denomination"));
    }
}
