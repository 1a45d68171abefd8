use dashcricket_engine::{Match, Player};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Widget};

/// Live header for the scoring screen: innings, ball count, both totals,
/// the batters at the crease and the current bowler.
pub struct Scoreboard<'a> {
    pub game: &'a Match,
}

impl Widget for Scoreboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 3 {
            render_line(Line::from(self.summary()), area.x, area.y, area.width, buf);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Green));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = [
            Line::from(Span::styled(self.summary(), accent())),
            Line::from(self.progress()),
            self.crease(),
            Line::from(self.bowling()),
        ];
        for (row, line) in lines.into_iter().enumerate() {
            render_centered(line, inner, inner.y + row as u16, buf);
        }
    }
}

impl Scoreboard<'_> {
    fn summary(&self) -> String {
        let game = self.game;
        format!(
            "{} {}  v  {} {}",
            game.batting_team().name,
            game.batting_team().total_runs,
            game.bowling_team().name,
            game.bowling_team().total_runs
        )
    }

    fn progress(&self) -> String {
        let game = self.game;
        format!(
            "{}  |  ball {}/{}  |  {} to go",
            game.innings().label(),
            game.balls_completed(),
            game.innings().ball_cap(),
            game.balls_remaining()
        )
    }

    fn crease(&self) -> Line<'static> {
        let game = self.game;
        let mut spans = Vec::new();
        match game.on_strike_batter() {
            Some(p) => spans.push(Span::styled(format!("*{}", batter_figures(p)), accent())),
            None => spans.push(Span::raw("*--")),
        }
        spans.push(Span::raw("   "));
        match game.non_strike_batter() {
            Some(p) => spans.push(Span::raw(batter_figures(p))),
            None => spans.push(Span::styled("(alone)", dim())),
        }
        Line::from(spans)
    }

    fn bowling(&self) -> String {
        match self.game.active_bowler() {
            Some(b) => format!(
                "{} {}.{}-{}  ({}/{} balls)",
                b.name,
                b.overs_bowled,
                b.balls_in_current_over,
                b.runs_conceded,
                b.balls_bowled,
                b.bowling_quota()
            ),
            None => "no bowler".to_string(),
        }
    }
}

fn batter_figures(p: &Player) -> String {
    format!("{} {} ({}/{})", p.name, p.runs_scored, p.balls_faced, p.ball_quota())
}

fn accent() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(Color::Indexed(240))
}

fn render_centered(line: Line, area: Rect, y: u16, buf: &mut Buffer) {
    if y >= area.y + area.height {
        return;
    }
    let w = line.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    render_line(line, x, y, area.width, buf);
}

fn render_line(line: Line, x: u16, y: u16, max_width: u16, buf: &mut Buffer) {
    let mut cx = x;
    let limit = x.saturating_add(max_width);
    for span in &line.spans {
        let mut run = String::new();
        for ch in span.content.chars() {
            if cx >= limit {
                break;
            }
            run.push(ch);
            cx += 1;
        }
        let start = cx.saturating_sub(run.chars().count() as u16);
        if !run.is_empty() {
            buf.set_string(start, y, run, span.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashcricket_engine::{Role, Team};

    fn team(name: &str) -> Team {
        let mut players = Vec::new();
        for i in 1..=4 {
            players.push(Player::new(format!("{name} Bat{i}"), Role::Batter));
        }
        for i in 1..=2 {
            players.push(Player::new(format!("{name} AR{i}"), Role::AllRounder));
        }
        for i in 1..=4 {
            players.push(Player::new(format!("{name} Bowl{i}"), Role::Bowler));
        }
        Team::new(name, players)
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_live_state() {
        let mut game = Match::new(team("A"), team("B"), 0);
        let ids: Vec<_> = game.opening_batter_candidates().iter().map(|p| p.id).collect();
        let bowler = game.opening_bowler_candidates()[0].id;
        game.start_innings(ids[0], ids[1], 0, bowler).expect("openers");
        game.apply_delivery(dashcricket_engine::Delivery::runs(4)).expect("four");

        let area = Rect::new(0, 0, 80, 6);
        let mut buf = Buffer::empty(area);
        Scoreboard { game: &game }.render(area, &mut buf);
        let text = buffer_text(&buf);

        assert!(text.contains("A 4  v  B 0"), "{text}");
        assert!(text.contains("1st Innings  |  ball 1/25  |  24 to go"), "{text}");
        assert!(text.contains("*A Bat1 4 (1/10)"), "{text}");
        assert!(text.contains("B AR1 0.1-4  (1/5 balls)"), "{text}");
    }

    #[test]
    fn test_tiny_area_shows_summary_only() {
        let game = Match::new(team("A"), team("B"), 1);
        let area = Rect::new(0, 0, 15, 1);
        let mut buf = Buffer::empty(area);
        Scoreboard { game: &game }.render(area, &mut buf);
        assert!(buffer_text(&buf).starts_with("B 0  v  A 0"));
    }
}
