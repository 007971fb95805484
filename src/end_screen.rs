use log::info;

use crate::constants::*;
use crate::types::Rect;

/// Which banner the end-of-run screen shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Banner {
    NewHighScore,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndChoice {
    Restart,
    Quit,
}

/// State that outlives a single run. Lives for the whole process, never persisted.
#[derive(Debug, Default)]
pub struct Session {
    best_score: u32,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Records a finished run and picks the banner for it.
    pub fn settle(&mut self, points: u32) -> Banner {
        if points > self.best_score {
            info!("New best score {} (was {})", points, self.best_score);
            self.best_score = points;
            Banner::NewHighScore
        } else {
            Banner::GameOver
        }
    }
}

pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
    pub choice: EndChoice,
}

pub struct EndScreen {
    pub banner: Banner,
    pub points: u32,
    pub restart: Button,
    pub quit: Button,
    banner_text: String,
}

impl EndScreen {
    pub fn new(banner: Banner, points: u32) -> Self {
        let banner_text = match banner {
            Banner::NewHighScore => format!("NEW SCORE | Points: {}", points),
            Banner::GameOver => format!("Game Over | Points: {}", points),
        };
        let left = WIDTH / 2 - BUTTON_WIDTH / 2;
        EndScreen {
            banner,
            points,
            restart: Button {
                rect: Rect::new(left, HEIGHT / 2 + RESTART_BUTTON_OFFSET, BUTTON_WIDTH, BUTTON_HEIGHT),
                label: "Restart",
                choice: EndChoice::Restart,
            },
            quit: Button {
                rect: Rect::new(left, HEIGHT / 2 + QUIT_BUTTON_OFFSET, BUTTON_WIDTH, BUTTON_HEIGHT),
                label: "Quit",
                choice: EndChoice::Quit,
            },
            banner_text,
        }
    }

    pub fn banner_text(&self) -> &str {
        &self.banner_text
    }

    /// Hit-tests a pressed area against the buttons, restart first.
    pub fn choose(&self, area: &Rect) -> Option<EndChoice> {
        [&self.restart, &self.quit]
            .into_iter()
            .find(|button| button.rect.intersects(area))
            .map(|button| button.choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, Viewport};

    #[test]
    fn test_settle_new_high_score() {
        let mut session = Session::new();
        assert_eq!(session.settle(30), Banner::NewHighScore);
        assert_eq!(session.settle(42), Banner::NewHighScore);
        assert_eq!(session.best_score(), 42);
    }

    #[test]
    fn test_settle_not_better() {
        let mut session = Session::new();
        session.settle(42);
        assert_eq!(session.settle(42), Banner::GameOver, "ties are not a new best");
        assert_eq!(session.settle(5), Banner::GameOver);
        assert_eq!(session.best_score(), 42);
    }

    #[test]
    fn test_zero_points_on_fresh_session() {
        let mut session = Session::new();
        assert_eq!(session.settle(0), Banner::GameOver);
        assert_eq!(session.best_score(), 0);
    }

    #[test]
    fn test_banner_text() {
        assert_eq!(EndScreen::new(Banner::NewHighScore, 42).banner_text(), "NEW SCORE | Points: 42");
        assert_eq!(EndScreen::new(Banner::GameOver, 3).banner_text(), "Game Over | Points: 3");
    }

    #[test]
    fn test_button_layout() {
        let screen = EndScreen::new(Banner::GameOver, 0);
        assert_eq!(screen.restart.rect, Rect::new(300, 350, 200, 50));
        assert_eq!(screen.quit.rect, Rect::new(300, 420, 200, 50));
    }

    #[test]
    fn test_choose() {
        let screen = EndScreen::new(Banner::GameOver, 0);
        assert_eq!(screen.choose(&Point::new(400, 375).into()), Some(EndChoice::Restart));
        assert_eq!(screen.choose(&Point::new(300, 420).into()), Some(EndChoice::Quit));
        // Gap between the buttons
        assert_eq!(screen.choose(&Point::new(400, 410).into()), None);
        assert_eq!(screen.choose(&Point::new(100, 100).into()), None);
    }

    #[test]
    fn test_choose_by_cell_span() {
        let screen = EndScreen::new(Banner::GameOver, 0);
        let viewport = Viewport::new(80, 24);
        // Row 16 spans the gap and the top of Quit.
        assert_eq!(screen.choose(&viewport.cell_span(30, 14)), Some(EndChoice::Restart));
        assert_eq!(screen.choose(&viewport.cell_span(49, 15)), Some(EndChoice::Restart));
        assert_eq!(screen.choose(&viewport.cell_span(40, 16)), Some(EndChoice::Quit));
        assert_eq!(screen.choose(&viewport.cell_span(40, 18)), Some(EndChoice::Quit));
        assert_eq!(screen.choose(&viewport.cell_span(29, 15)), None);
        assert_eq!(screen.choose(&viewport.cell_span(50, 17)), None);
    }
}
