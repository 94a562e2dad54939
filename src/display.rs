//! Shared display utilities for rendering Azul game state in the terminal
//!
//! Provides colorized, human-readable output for game boards, displays, and actions.

use std::fmt::Write;

use azul_engine::{
    Action, Color, DraftDestination, DraftSource, GameState, Outcome, PlayerIdx, Token,
    BOARD_SIZE, WALL_PATTERN,
};

// ANSI color codes for tile display
pub const BLUE: &str = "\x1b[94m";
pub const YELLOW: &str = "\x1b[93m";
pub const RED: &str = "\x1b[91m";
pub const BLACK: &str = "\x1b[90m";
pub const WHITE: &str = "\x1b[97m";
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub fn color_code(color: Color) -> &'static str {
    match color {
        Color::Blue => BLUE,
        Color::Yellow => YELLOW,
        Color::Red => RED,
        Color::Black => BLACK,
        Color::White => WHITE,
    }
}

pub fn color_char(color: Color) -> char {
    match color {
        Color::Blue => 'B',
        Color::Yellow => 'Y',
        Color::Red => 'R',
        Color::Black => 'K',
        Color::White => 'W',
    }
}

pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::Blue => "Blue",
        Color::Yellow => "Yellow",
        Color::Red => "Red",
        Color::Black => "Black",
        Color::White => "White",
    }
}

pub fn display_tile(color: Color) -> String {
    format!("{}{}{}", color_code(color), color_char(color), RESET)
}

pub fn display_token(token: Token) -> String {
    match token {
        Token::Tile(c) => display_tile(c),
        Token::Marker => format!("{BOLD}1{RESET}"),
    }
}

/// Format an action for display
pub fn format_action(action: &Action) -> String {
    let source = match action.source {
        DraftSource::Factory(f) => format!("F{}", f),
        DraftSource::Center => "Center".to_string(),
    };
    let dest = match action.dest {
        DraftDestination::PatternLine(r) => format!("Line {}", r + 1),
        DraftDestination::Floor => "Floor".to_string(),
    };
    format!("{} {} -> {}", source, display_tile(action.color), dest)
}

/// Format an action without ANSI codes (for logs)
pub fn format_action_plain(action: &Action) -> String {
    let source = match action.source {
        DraftSource::Factory(f) => format!("F{}", f),
        DraftSource::Center => "C".to_string(),
    };
    let dest = match action.dest {
        DraftDestination::PatternLine(r) => format!("L{}", r + 1),
        DraftDestination::Floor => "Floor".to_string(),
    };
    format!("{} {} {}", source, color_name(action.color), dest)
}

pub fn format_outcome(outcome: Outcome) -> String {
    match outcome {
        Outcome::Winner(p) => format!("player {p} wins"),
        Outcome::Draw => "draw".to_string(),
    }
}

/// Render the full game board with all player information.
///
/// If `highlight_player` is Some, that player's board is shown with emphasis.
pub fn render_board(state: &GameState, highlight_player: Option<PlayerIdx>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_board(&mut out, state, highlight_player);
    out
}

fn write_board(
    out: &mut String,
    state: &GameState,
    highlight_player: Option<PlayerIdx>,
) -> std::fmt::Result {
    let rule = "══════════════════════════════════════════════════════════════";
    writeln!(out, "\n{BOLD}{rule}{RESET}")?;
    writeln!(
        out,
        "{BOLD}  Round {}{RESET}   |   Current Player: {}",
        state.round_number, state.current_player
    )?;
    writeln!(out, "{BOLD}{rule}{RESET}\n")?;

    // Factories
    writeln!(out, "{BOLD}FACTORIES:{RESET}")?;
    for (f, factory) in state.factories.iter().enumerate() {
        write!(out, "  F{}: ", f)?;
        if factory.is_empty() {
            write!(out, "{DIM}(empty){RESET}")?;
        } else {
            for &color in factory.tiles() {
                write!(out, "{} ", display_tile(color))?;
            }
        }
        writeln!(out)?;
    }

    // Center
    write!(out, "\n{BOLD}CENTER:{RESET} ")?;
    if state.center.has_marker() {
        write!(out, "{} ", display_token(Token::Marker))?;
    }
    if state.center.is_empty() {
        write!(out, "{DIM}(empty){RESET}")?;
    } else {
        for &color in state.center.tiles() {
            write!(out, "{} ", display_tile(color))?;
        }
    }
    writeln!(out, "\n")?;

    // Player boards
    for (p, player) in state.players.iter().enumerate() {
        let style = if highlight_player == Some(p as PlayerIdx) {
            BOLD
        } else {
            DIM
        };
        writeln!(out, "{style}PLAYER {} (Score: {}){RESET}", p, player.score)?;
        writeln!(out, "  Pattern Lines          Wall")?;

        for row in 0..BOARD_SIZE {
            // Pattern line (right-aligned)
            let line = &player.pattern_lines[row];
            let cap = row + 1;
            let empty = cap - line.count as usize;

            write!(out, "  {}", "  ".repeat(BOARD_SIZE - cap))?;
            for _ in 0..empty {
                write!(out, "{DIM}.{RESET} ")?;
            }
            if let Some(color) = line.color {
                for _ in 0..line.count {
                    write!(out, "{} ", display_tile(color))?;
                }
            }

            write!(out, " -> ")?;

            for col in 0..BOARD_SIZE {
                match player.wall[row][col] {
                    Some(color) => write!(out, "{} ", display_tile(color))?,
                    // Show expected color dimmed
                    None => write!(out, "{DIM}{}{RESET} ", color_char(WALL_PATTERN[row][col]))?,
                }
            }
            writeln!(out)?;
        }

        write!(out, "  Floor: ")?;
        if player.floor.is_empty() {
            write!(out, "{DIM}(empty){RESET}")?;
        } else {
            for &token in &player.floor {
                write!(out, "{} ", display_token(token))?;
            }
        }
        writeln!(out, "\n")?;
    }
    Ok(())
}

/// Print the full game board to stdout
pub fn display_board(state: &GameState, highlight_player: Option<PlayerIdx>) {
    print!("{}", render_board(state, highlight_player));
}

#[cfg(test)]
mod tests {
    use super::*;
    use azul_engine::setup_game_with_bag;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_format_action() {
        let action = Action::new(
            DraftSource::Factory(3),
            Color::White,
            DraftDestination::PatternLine(0),
        );
        assert_eq!(format_action_plain(&action), "F3 White L1");
        assert!(format_action(&action).starts_with("F3 "));
        assert!(format_action(&action).ends_with("-> Line 1"));

        let action = Action::new(DraftSource::Center, Color::Red, DraftDestination::Floor);
        assert_eq!(format_action_plain(&action), "C Red Floor");
    }

    #[test]
    fn test_render_board_shows_displays_and_players() {
        let order: Vec<Color> = azul_engine::ALL_COLORS
            .iter()
            .flat_map(|&c| std::iter::repeat(c).take(20))
            .collect();
        let state = setup_game_with_bag(order, &mut StdRng::seed_from_u64(0)).unwrap();
        let text = render_board(&state, Some(0));

        assert!(text.contains("Round 1"));
        assert!(text.contains("F4: "));
        assert!(text.contains("PLAYER 0 (Score: 0)"));
        assert!(text.contains("PLAYER 1 (Score: 0)"));
        assert_eq!(text.matches("Floor: ").count(), 2);
    }

    #[test]
    fn test_format_outcome() {
        assert_eq!(format_outcome(Outcome::Winner(1)), "player 1 wins");
        assert_eq!(format_outcome(Outcome::Draw), "draw");
    }
}
