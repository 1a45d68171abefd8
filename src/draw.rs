use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::scoreboard::Scoreboard;
use crate::state::app_state::{Modal, SetupField};
use crate::ui::layout::LayoutAreas;
use dashcricket_engine::{BOUNDARY_RUNS, Match, Player, TeamCard, TossDecision};

static TABS: &[&str; 6] = &["Teams", "Players", "Toss", "Innings Setup", "Scoring", "Scorecard"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::TeamNames => draw_team_names(f, layout.main, app),
            MenuItem::Players => draw_players(f, layout.main, app),
            MenuItem::Toss => draw_toss(f, layout.main, app),
            MenuItem::InningsSetup => draw_innings_setup(f, layout.main, app),
            MenuItem::Scoring => draw_scoring(f, layout.main, app),
            MenuItem::Scorecard => draw_scorecard(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        draw_status(f, layout.status, app);

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
    });
    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::TeamNames => 0,
        MenuItem::Players => 1,
        MenuItem::Toss => 2,
        MenuItem::InningsSetup => 3,
        MenuItem::Scoring => 4,
        MenuItem::Scorecard => 5,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: F1 ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let line = match app.state.last_error.as_deref() {
        Some(err) => Line::from(Span::styled(format!(" {err}"), Style::default().fg(Color::Red))),
        None => Line::from(Span::styled(
            " Ctrl+C quit  F1 help  F2 logs",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray))
        .output_target(false);
    f.render_widget(widget, area);
}

// ---------------------------------------------------------------------------
// Setup screens
// ---------------------------------------------------------------------------

fn draw_team_names(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Team Names ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from("Name both sides. Tab switches field, Enter continues."),
        Line::from(""),
    ];
    for (idx, sheet) in app.state.sheets.iter().enumerate() {
        let focused = idx == app.state.names.field;
        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} Team {}: ", if focused { ">" } else { " " }, idx + 1),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(format!("{}{cursor}", sheet.name), focus_style(focused)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_players(f: &mut Frame, area: Rect, app: &App) {
    let team = app.state.players.team;
    let sheet = &app.state.sheets[team];
    let block = default_border(Color::White).title(format!(" {} Players ", sheet.name.trim()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [legend, table_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    let (batters, all_rounders, bowlers) = sheet.composition();
    let valid = sheet.has_valid_composition();
    f.render_widget(
        Paragraph::new(vec![
            Line::from("Type a name, Tab cycles role, Up/Down moves, Enter saves, Esc goes back"),
            Line::from(Span::styled(
                format!("{batters} batters, {all_rounders} all-rounders, {bowlers} bowlers (need 4 / 2 / 4)"),
                Style::default().fg(if valid { Color::Green } else { Color::Yellow }),
            )),
        ]),
        legend,
    );

    let rows = sheet.players.iter().enumerate().map(|(idx, entry)| {
        let focused = idx == app.state.players.row;
        let name = if focused {
            format!("{}_", entry.name)
        } else {
            entry.name.clone()
        };
        Row::new(vec![
            Cell::from(format!("{:>2}", idx + 1)),
            Cell::from(name),
            Cell::from(entry.role.label()),
        ])
        .style(focus_style(focused))
    });
    let table = Table::new(rows, [Constraint::Length(3), Constraint::Fill(1), Constraint::Length(12)])
        .header(Row::new(vec!["#", "Name", "Role"]).style(Style::default().fg(Color::Gray)));
    f.render_widget(table, table_area);
}

fn draw_toss(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Toss ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let toss = &app.state.toss;
    let winner = &app.state.sheets[toss.winner].name;
    let decision = match toss.decision {
        TossDecision::Bat => "bat",
        TossDecision::Bowl => "bowl",
    };
    let lines = vec![
        Line::from("Left/Right picks the winner, Up/Down the choice, Enter starts the match."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Toss won by "),
            Span::styled(winner.clone(), focus_style(true)),
        ]),
        Line::from(vec![
            Span::raw("Elected to "),
            Span::styled(decision, focus_style(true)),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_innings_setup(f: &mut Frame, area: Rect, app: &App) {
    let Some(game) = app.game() else {
        draw_placeholder(f, area, "No match in progress");
        return;
    };
    let block = default_border(Color::White).title(format!(" {} Setup ", game.innings().label()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let batters = game.opening_batter_candidates();
    let bowlers = game.opening_bowler_candidates();
    let form = &app.state.setup;
    let pick = |list: &[&Player], idx: usize| {
        list.get(idx)
            .map(|p| format!("{} ({}, {} balls left)", p.name, p.role.label(), p.balls_left_to_face()))
            .unwrap_or_else(|| "--".to_string())
    };

    let mut lines = vec![
        Line::from(format!(
            "{} bat, {} bowl. Up/Down field, Left/Right choose, Enter starts.",
            game.batting_team().name,
            game.bowling_team().name
        )),
        Line::from(""),
    ];
    for field in SetupField::ALL {
        let value = match field {
            SetupField::Batter1 => pick(batters.as_slice(), form.batter1),
            SetupField::Batter2 => pick(batters.as_slice(), form.batter2),
            SetupField::OnStrike => format!("Batter {}", form.on_strike + 1),
            SetupField::Bowler => bowlers
                .get(form.bowler)
                .map(|p| {
                    format!(
                        "{} ({}, {} balls left)",
                        p.name,
                        p.role.label(),
                        p.bowling_quota().saturating_sub(p.balls_bowled)
                    )
                })
                .unwrap_or_else(|| "--".to_string()),
        };
        let focused = field == form.field;
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} {:<10}", if focused { ">" } else { " " }, field.label()),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(value, focus_style(focused)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

fn draw_scoring(f: &mut Frame, area: Rect, app: &App) {
    let Some(game) = app.game() else {
        draw_placeholder(f, area, "No match in progress");
        return;
    };

    let [board, legend, body] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(area);

    f.render_widget(Scoreboard { game }, board);
    draw_scoring_legend(f, legend, game);

    let [batting, log] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);
    draw_batting_table(f, batting, game);
    draw_ball_log(f, log, app);

    if let Some(modal) = app.state.modal.as_ref() {
        draw_modal(f, area, game, modal);
    }
}

fn draw_scoring_legend(f: &mut Frame, area: Rect, game: &Match) {
    let ladder = BOUNDARY_RUNS
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}={r}", i + 6))
        .collect::<Vec<_>>()
        .join(" ");
    let mut lines = vec![Line::from(format!(
        " 0-5 runs  {ladder}  w wicket  n no-ball  d wide  b byes  c custom"
    ))];
    if game.is_only_one_batter_left() {
        lines.push(Line::from(Span::styled(
            " Last batter: only 0, 10, 15, 20 or 25 allowed",
            Style::default().fg(Color::Yellow),
        )));
    }
    f.render_widget(Paragraph::new(lines).style(Style::default().fg(Color::Gray)), area);
}

fn draw_batting_table(f: &mut Frame, area: Rect, game: &Match) {
    let block = default_border(Color::DarkGray).title(format!(" {} Batting ", game.batting_team().name));
    let striker = game.on_strike_batter().map(|p| p.id);
    let partner = game.non_strike_batter().map(|p| p.id);

    let rows = game
        .batting_team()
        .players
        .iter()
        .filter(|p| p.role.can_bat())
        .map(|p| {
            let marker = if Some(p.id) == striker {
                "*"
            } else if Some(p.id) == partner {
                "+"
            } else {
                " "
            };
            let style = if p.can_still_bat() {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(p.name.clone()),
                Cell::from(p.runs_scored.to_string()),
                Cell::from(format!("{}/{}", p.balls_faced, p.ball_quota())),
            ])
            .style(style)
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(5),
            Constraint::Length(6),
        ],
    )
    .header(Row::new(vec!["", "Batter", "Runs", "Balls"]).style(Style::default().fg(Color::Gray)))
    .block(block);
    f.render_widget(table, area);
}

fn draw_ball_log(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Ball by Ball ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let max = inner.height as usize;
    let lines: Vec<Line> = app
        .state
        .ball_log
        .iter()
        .rev()
        .take(max)
        .map(|entry| {
            Line::from(vec![
                Span::styled(format!("{} ", entry.at), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{}.{:<2} ", entry.innings.number(), entry.ball),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw(entry.text.clone()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_modal(f: &mut Frame, area: Rect, game: &Match, modal: &Modal) {
    let (title, lines) = match modal {
        Modal::Byes { running, boundary } => (
            " Byes ",
            vec![
                Line::from(format!("Running byes: {running}  (Up/Down)")),
                Line::from(format!(
                    "Boundary 4:   {}  (Left/Right)",
                    if *boundary { "yes" } else { "no" }
                )),
                Line::from(""),
                Line::from("Enter scores, Esc cancels"),
            ],
        ),
        Modal::Custom { input } => (
            " Custom Runs ",
            vec![
                Line::from(format!("Runs: {input}_")),
                Line::from(""),
                Line::from("Enter scores, Esc cancels"),
            ],
        ),
        Modal::ReplaceBatter { cursor } => (
            " Next Batter ",
            picker_lines(&game.available_batters(), *cursor, |p| {
                format!("{} ({} balls left)", p.name, p.balls_left_to_face())
            }),
        ),
        Modal::SelectBowler { cursor } => (
            " Next Bowler ",
            picker_lines(&game.available_bowlers(), *cursor, |p| {
                format!(
                    "{} ({} balls left)",
                    p.name,
                    p.bowling_quota().saturating_sub(p.balls_bowled)
                )
            }),
        ),
    };

    let height = (lines.len() as u16 + 2).min(area.height);
    let width = 48.min(area.width);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(default_border(Color::Yellow).title(title)),
        popup,
    );
}

fn picker_lines(players: &[&Player], cursor: usize, label: impl Fn(&Player) -> String) -> Vec<Line<'static>> {
    players
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let focused = idx == cursor;
            Line::from(Span::styled(
                format!("{} {}", if focused { ">" } else { " " }, label(*p)),
                focus_style(focused),
            ))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scorecard and help
// ---------------------------------------------------------------------------

fn draw_scorecard(f: &mut Frame, area: Rect, app: &App) {
    let Some(game) = app.game() else {
        draw_placeholder(f, area, "No match played yet");
        return;
    };
    let card = game.scorecard();
    let block = default_border(Color::White).title(" Scorecard ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, body] = Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    let result = card.result.clone().unwrap_or_else(|| "Match in progress".to_string());
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(result, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))),
            Line::from(Span::styled("r rematch with the same teams, q quit", Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center),
        header,
    );

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);
    draw_team_card(f, left, &card.teams[0]);
    draw_team_card(f, right, &card.teams[1]);
}

fn draw_team_card(f: &mut Frame, area: Rect, card: &TeamCard) {
    let block = default_border(Color::DarkGray).title(format!(" {} {} ", card.name, card.total_runs));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![Line::from(Span::styled("Batting", Style::default().fg(Color::Gray)))];
    for line in &card.batting {
        lines.push(Line::from(format!("  {:<18} {:>4} ({})", line.name, line.runs, line.balls)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Bowling", Style::default().fg(Color::Gray))));
    for line in &card.bowling {
        lines.push(Line::from(format!(
            "  {:<18} {:>4}-{:<4} ({} balls)",
            line.name,
            line.overs(),
            line.runs_conceded,
            line.balls
        )));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Help (Esc to close) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = "\
Scoring
  0-5        runs off the bat
  6 7 8 9    boundary ladder: 10 15 20 25
  w          wicket (-25 to the side and the striker)
  n / d      no-ball / wide (1 run to the side)
  b          byes: running part plus an optional boundary 4
  c          custom runs

Rules
  Innings of 25, 50 and 25 balls. Overs are 5 balls.
  Batters face up to 10 balls, all-rounders 5, bowlers never bat.
  Bowlers bowl up to 10 balls, all-rounders 5, batters never bowl.
  Strike changes on 1 or 3 runs run, and at the end of each over.

Anywhere
  F1 help   F2 or \" logs   f full screen   q or Ctrl+C quit";
    f.render_widget(Paragraph::new(text), inner);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}
