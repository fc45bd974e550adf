use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use piloune_game::{PetState, Stat};
use std::io::{self, Write};

const BAR_WIDTH: i32 = 20;
const HELP: &str = "[s]ucre [i]ris [t]witch [n] pétée [d]ormir [c]afé [h] câlin \
[k] coco pops [v] TDAH [f] ressens [w] douche [p] spa | [x] reset [m] max [q] quitter";

pub fn draw(out: &mut impl Write, state: &PetState) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    queue!(out, Print(format!("👻 {}", expression(state))))?;
    queue!(out, MoveTo(0, 2), Print(&state.message))?;

    let mut row: u16 = 4;
    if state.mode.is_ronron() {
        let progress = match state.pending {
            Some(pending) => format!("  {}: {}/3", pending.action.label(), pending.count),
            None => String::new(),
        };
        queue!(
            out,
            MoveTo(0, row),
            SetForegroundColor(Color::Magenta),
            Print(format!("😾 MODE RONRON{progress}")),
            ResetColor
        )?;
        row += 2;
    }

    for stat in Stat::ALL {
        let value = state.stats.get(stat);
        queue!(
            out,
            MoveTo(0, row),
            Print(format!("{:<10} ", stat.label())),
            SetForegroundColor(color_for(value)),
            Print(bar(value)),
            ResetColor,
            Print(format!(" {value:>3}/100"))
        )?;
        row += 1;
    }

    if state.ronron_unlocked {
        row += 1;
        queue!(out, MoveTo(0, row), Print("🏆 Mode Ronron débloqué !"))?;
    }

    queue!(out, MoveTo(0, row + 2), Print(HELP))?;
    out.flush()
}

/// Expression derived from mood, as the original UI shows it.
fn expression(state: &PetState) -> &'static str {
    if state.mode.is_ronron() {
        return "😾";
    }
    match state.stats.happiness {
        80..=100 => "😄",
        60..=79 => "😊",
        40..=59 => "😐",
        _ => "😔",
    }
}

fn bar(value: i32) -> String {
    let filled = (value * BAR_WIDTH / 100).clamp(0, BAR_WIDTH);
    let mut s = String::new();
    for i in 0..BAR_WIDTH {
        s.push(if i < filled { '█' } else { '░' });
    }
    s
}

const fn color_for(value: i32) -> Color {
    if value >= 70 {
        Color::Green
    } else if value >= 40 {
        Color::Yellow
    } else {
        Color::Red
    }
}
