//! Terminal rendering: the live status line, verbose diagnostics and the
//! gesture guide.

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, GestureMeta};
use crate::gesture::{GestureLabel, GestureRole, PATTERN_RULES, Recognition};
use owo_colors::OwoColorize;
use std::time::{Duration, Instant};

pub const WAITING_TEXT: &str = "Waiting for gesture...";

/// Clear the current terminal line (replaces the status line)
pub fn clear_line() {
    eprint!("\r\x1b[2K");
}

/// Frames per second, recomputed once a second has passed.
pub struct FpsCounter<C: Clock = SystemClock> {
    clock: C,
    window_start: Instant,
    frames: u32,
    fps: f64,
}

impl FpsCounter<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for FpsCounter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FpsCounter<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            window_start: clock.now(),
            clock,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count one frame and return the current rate.
    pub fn tick(&mut self) -> f64 {
        self.frames += 1;
        let now = self.clock.now();
        let elapsed = now.duration_since(self.window_start);
        if elapsed > Duration::from_secs(1) {
            self.fps = f64::from(self.frames) / elapsed.as_secs_f64();
            self.frames = 0;
            self.window_start = now;
        }
        self.fps
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

/// One status line: gesture with icon and phrase, speaking dot, frame rate.
///
/// A label without metadata is shown as waiting, same as no hand.
pub fn format_status(
    label: Option<&GestureLabel>,
    meta: Option<&GestureMeta>,
    speaking: bool,
    fps: f64,
    color: bool,
) -> String {
    let body = match (label, meta) {
        (Some(label), Some(meta)) => {
            let title = format!("{} {}", meta.icon, label.as_str().to_uppercase());
            let title = title.trim_start().to_string();
            if color {
                let [r, g, b] = meta.color;
                format!("{}  {}", title.truecolor(r, g, b).bold(), meta.text)
            } else {
                format!("{}  {}", title, meta.text)
            }
        }
        _ => {
            if color {
                WAITING_TEXT.dimmed().to_string()
            } else {
                WAITING_TEXT.to_string()
            }
        }
    };

    let dot = if speaking { "●" } else { "○" };
    let fps = format!("{} fps", fps.round() as u32);
    if color {
        let dot = if speaking {
            dot.green().to_string()
        } else {
            dot.dimmed().to_string()
        };
        format!("{body}  {dot} {}", fps.dimmed())
    } else {
        format!("{body}  {dot} {fps}")
    }
}

/// Redraws the status line on stderr when its content changes.
pub struct Overlay<C: Clock = SystemClock> {
    fps: FpsCounter<C>,
    color: bool,
    last: String,
}

impl Overlay<SystemClock> {
    pub fn new(color: bool) -> Self {
        Self::with_clock(color, SystemClock)
    }
}

impl<C: Clock> Overlay<C> {
    pub fn with_clock(color: bool, clock: C) -> Self {
        Self {
            fps: FpsCounter::with_clock(clock),
            color,
            last: String::new(),
        }
    }

    /// Count a frame and build its status line; `None` if unchanged since the last one.
    pub fn render(
        &mut self,
        label: Option<&GestureLabel>,
        meta: Option<&GestureMeta>,
        speaking: bool,
    ) -> Option<String> {
        let fps = self.fps.tick();
        let line = format_status(label, meta, speaking, fps, self.color);
        if line == self.last {
            return None;
        }
        self.last = line.clone();
        Some(line)
    }

    pub fn draw(
        &mut self,
        label: Option<&GestureLabel>,
        meta: Option<&GestureMeta>,
        speaking: bool,
    ) {
        if let Some(line) = self.render(label, meta, speaking) {
            clear_line();
            eprint!("{line}");
        }
    }

    /// Move past the status line so later output starts clean.
    pub fn finish(&mut self) {
        if !self.last.is_empty() {
            eprintln!();
            self.last.clear();
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps.fps()
    }
}

/// Per-frame diagnostic line for `-vv`.
pub fn describe_recognition(sequence: u64, recognition: Option<&Recognition>) -> String {
    match recognition {
        Some(r) => format!(
            "frame {sequence}: {} -> {} ({}), smoothed {}",
            r.states, r.raw, r.matched, r.smoothed
        ),
        None => format!("frame {sequence}: no hand"),
    }
}

/// Human-readable list of what each hand shape produces.
pub fn format_gesture_guide(config: &Config, color: bool) -> String {
    let mut lines = Vec::new();
    let mut bound = Vec::new();

    let push = |id: &str, shape: String, lines: &mut Vec<String>| {
        let meta = config.gesture(id);
        let icon = meta.map(|m| m.icon.as_str()).unwrap_or("");
        let text = meta.map(|m| m.text.as_str()).unwrap_or("");
        let name = format!("{id:<12}");
        let name = match (color, meta) {
            (true, Some(meta)) => {
                let [r, g, b] = meta.color;
                name.truecolor(r, g, b).bold().to_string()
            }
            _ => name,
        };
        lines.push(format!("  {icon:<3} {name} {shape:<26} {text}"));
    };

    for rule in PATTERN_RULES.iter() {
        let id = config.roles.get(rule.role);
        let shape = rule
            .patterns
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" / ");
        push(id, shape, &mut lines);
        bound.push(id.to_string());
    }

    let idle = config.roles.get(GestureRole::Idle);
    push(idle, "anything else".to_string(), &mut lines);
    bound.push(idle.to_string());

    let unbound: Vec<&String> = config
        .gestures
        .keys()
        .filter(|id| !bound.contains(*id))
        .collect();

    let mut out = String::from("Finger order: thumb index middle ring pinky (1 = open)\n\n");
    out.push_str(&lines.join("\n"));
    out.push('\n');
    if !unbound.is_empty() {
        let names: Vec<&str> = unbound.iter().map(|s| s.as_str()).collect();
        out.push_str(&format!("\nNot bound to any hand shape: {}\n", names.join(", ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use crate::gesture::GestureRecognizer;
    use crate::hand::synthetic::pose_from_states;

    fn meta() -> GestureMeta {
        GestureMeta {
            text: "Halo! Senang bertemu denganmu.".to_string(),
            color: [0, 255, 0],
            icon: "👋".to_string(),
        }
    }

    #[test]
    fn test_fps_counts_over_one_second() {
        let clock = MockClock::new();
        let mut fps = FpsCounter::with_clock(clock.clone());
        for _ in 0..29 {
            clock.advance(Duration::from_millis(35));
            fps.tick();
        }
        // 29 * 35ms = 1015ms
        assert!((fps.fps() - 29.0 / 1.015).abs() < 0.01);
    }

    #[test]
    fn test_fps_zero_before_first_second() {
        let clock = MockClock::new();
        let mut fps = FpsCounter::with_clock(clock.clone());
        clock.advance(Duration::from_millis(500));
        assert_eq!(fps.tick(), 0.0);
    }

    #[test]
    fn test_status_with_gesture() {
        let label = GestureLabel::new("halo");
        let line = format_status(Some(&label), Some(&meta()), true, 29.6, false);
        assert_eq!(line, "👋 HALO  Halo! Senang bertemu denganmu.  ● 30 fps");
    }

    #[test]
    fn test_status_waiting() {
        let line = format_status(None, None, false, 0.0, false);
        assert_eq!(line, "Waiting for gesture...  ○ 0 fps");
    }

    #[test]
    fn test_status_label_without_meta_is_waiting() {
        let label = GestureLabel::new("unknown");
        let line = format_status(Some(&label), None, false, 0.0, false);
        assert!(line.starts_with(WAITING_TEXT));
    }

    #[test]
    fn test_status_color_contains_escape() {
        let label = GestureLabel::new("halo");
        let line = format_status(Some(&label), Some(&meta()), false, 0.0, true);
        assert!(line.contains("\x1b["));
        assert!(line.contains("HALO"));
    }

    #[test]
    fn test_overlay_skips_unchanged_line() {
        let clock = MockClock::new();
        let mut overlay = Overlay::with_clock(false, clock.clone());
        let label = GestureLabel::new("halo");
        assert!(overlay.render(Some(&label), Some(&meta()), false).is_some());
        assert!(overlay.render(Some(&label), Some(&meta()), false).is_none());
        assert!(overlay.render(Some(&label), Some(&meta()), true).is_some());
    }

    #[test]
    fn test_describe_recognition() {
        let mut recognizer = GestureRecognizer::default();
        let pose = pose_from_states("01100".parse().unwrap());
        let rec = recognizer.recognize_detailed(Some(&pose)).unwrap();
        assert_eq!(
            describe_recognition(4, Some(&rec)),
            "frame 4: 01100 -> perkenalan (rule 2), smoothed perkenalan"
        );
        assert_eq!(describe_recognition(5, None), "frame 5: no hand");
    }

    #[test]
    fn test_guide_lists_every_rule_and_unbound() {
        let guide = format_gesture_guide(&Config::default(), false);
        assert!(guide.contains("11111"));
        assert!(guide.contains("01100 / 11100"));
        assert!(guide.contains("anything else"));
        // "tidak" has no rule pointing at it
        assert!(guide.contains("Not bound to any hand shape: tidak"));
    }
}
