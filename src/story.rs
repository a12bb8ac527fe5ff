//! Title, narration, the five days, and the ending.

use tracing::info;

pub const CARD_SECS: f32 = 2.0;

pub const TITLE: &str = "Living with Younghee";

pub const NARRATION: [&str; 5] = [
    "Life had stopped being any fun,",
    "until a cat moved in...",
    "and her name is Younghee..!",
    "Get through five days of Younghee's mischief,",
    "and win your feelings back!",
];

pub const ENDING: &str = "Every feeling is back! Life with Younghee can finally be happy!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Day {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::One, Day::Two, Day::Three, Day::Four, Day::Five];

    pub fn number(self) -> u8 {
        match self {
            Day::One => 1,
            Day::Two => 2,
            Day::Three => 3,
            Day::Four => 4,
            Day::Five => 5,
        }
    }

    pub fn next(self) -> Option<Day> {
        match self {
            Day::One => Some(Day::Two),
            Day::Two => Some(Day::Three),
            Day::Three => Some(Day::Four),
            Day::Four => Some(Day::Five),
            Day::Five => None,
        }
    }

    pub fn emotion(self) -> Emotion {
        match self {
            Day::One => Emotion::Anger,
            Day::Two => Emotion::Anxiety,
            Day::Three => Emotion::Worry,
            Day::Four => Emotion::Understanding,
            Day::Five => Emotion::Moved,
        }
    }

    pub fn narrative(self) -> &'static str {
        match self {
            Day::One => "Younghee is running wild! Somebody has to catch her.",
            Day::Two => "Younghee is asleep..! Slip out of the room without a sound.",
            Day::Three => "Younghee wandered outside... time to go find her.",
            Day::Four => "Younghee wants to play rough. Dodge and hold out.",
            Day::Five => "Younghee curls up in your arms. Let her sleep.",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Day::One => "Catch the cat while she runs around!",
            Day::Two => "Moving makes noise, standing still calms it (100 wakes the cat)",
            Day::Three => "Hurry to where Younghee is waiting...",
            Day::Four => "Stay away from Younghee and the kibble she throws..!",
            Day::Five => "Touch the pests with the pointer to clear them!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emotion {
    Anger,
    Anxiety,
    Worry,
    Understanding,
    Moved,
}

impl Emotion {
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Anxiety => "anxiety",
            Emotion::Worry => "worry",
            Emotion::Understanding => "understanding",
            Emotion::Moved => "being moved",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scene {
    Title,
    Narration,
    Intro { day: Day, shown: f32 },
    Playing(Day),
    Result { day: Day, won: bool, shown: f32 },
    Ending,
}

/// What the caller has to do after a story tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    StartMission(Day),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Story {
    scene: Scene,
    emotions: Vec<Emotion>,
}

impl Story {
    pub fn new() -> Self {
        Self {
            scene: Scene::Title,
            emotions: Vec::new(),
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn emotions(&self) -> &[Emotion] {
        &self.emotions
    }

    /// Space or click: leaves the title and narration screens. Ignored elsewhere.
    pub fn confirm(&mut self) {
        match self.scene {
            Scene::Title => self.enter(Scene::Narration),
            Scene::Narration => self.enter(Scene::Intro {
                day: Day::One,
                shown: 0.0,
            }),
            _ => {}
        }
    }

    pub fn tick(&mut self, dt: f32) -> Option<Cue> {
        match self.scene {
            Scene::Intro { day, shown } => {
                let shown = shown + dt;
                if shown >= CARD_SECS {
                    self.enter(Scene::Playing(day));
                    return Some(Cue::StartMission(day));
                }
                self.scene = Scene::Intro { day, shown };
            }
            Scene::Result { day, won, shown } => {
                let shown = shown + dt;
                if shown < CARD_SECS {
                    self.scene = Scene::Result { day, won, shown };
                } else if !won {
                    self.enter(Scene::Intro { day, shown: 0.0 });
                } else if let Some(next) = day.next() {
                    self.enter(Scene::Intro {
                        day: next,
                        shown: 0.0,
                    });
                } else {
                    self.enter(Scene::Ending);
                }
            }
            _ => {}
        }
        None
    }

    /// Records how the running mission ended. A win keeps the day's emotion.
    pub fn finish(&mut self, won: bool) {
        let Scene::Playing(day) = self.scene else {
            return;
        };
        if won {
            self.emotions.push(day.emotion());
        }
        info!(day = day.number(), won, "mission over");
        self.enter(Scene::Result {
            day,
            won,
            shown: 0.0,
        });
    }

    fn enter(&mut self, scene: Scene) {
        info!(?scene, "scene change");
        self.scene = scene;
    }
}

impl Default for Story {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_day(story: &mut Story, won: bool) -> Day {
        let mut cue = None;
        while cue.is_none() {
            cue = story.tick(0.5);
        }
        let Some(Cue::StartMission(day)) = cue else {
            unreachable!()
        };
        story.finish(won);
        while matches!(story.scene(), Scene::Result { .. }) {
            story.tick(0.5);
        }
        day
    }

    #[test]
    fn confirm_walks_through_the_opening() {
        let mut s = Story::new();
        assert_eq!(s.scene(), Scene::Title);
        s.confirm();
        assert_eq!(s.scene(), Scene::Narration);
        s.confirm();
        assert_eq!(
            s.scene(),
            Scene::Intro {
                day: Day::One,
                shown: 0.0
            }
        );
        s.confirm();
        assert!(matches!(s.scene(), Scene::Intro { .. }));
    }

    #[test]
    fn intro_card_starts_the_mission() {
        let mut s = Story::new();
        s.confirm();
        s.confirm();
        assert_eq!(s.tick(1.0), None);
        assert_eq!(s.tick(1.0), Some(Cue::StartMission(Day::One)));
        assert_eq!(s.scene(), Scene::Playing(Day::One));
    }

    #[test]
    fn a_loss_replays_the_same_day() {
        let mut s = Story::new();
        s.confirm();
        s.confirm();
        assert_eq!(play_day(&mut s, false), Day::One);
        assert_eq!(play_day(&mut s, false), Day::One);
        assert!(s.emotions().is_empty());
        assert_eq!(play_day(&mut s, true), Day::One);
        assert_eq!(play_day(&mut s, true), Day::Two);
    }

    #[test]
    fn five_wins_reach_the_ending() {
        let mut s = Story::new();
        s.confirm();
        s.confirm();
        let days: Vec<Day> = (0..5).map(|_| play_day(&mut s, true)).collect();
        assert_eq!(days, Day::ALL.to_vec());
        assert_eq!(s.scene(), Scene::Ending);
        assert_eq!(
            s.emotions(),
            &[
                Emotion::Anger,
                Emotion::Anxiety,
                Emotion::Worry,
                Emotion::Understanding,
                Emotion::Moved
            ]
        );
        assert_eq!(s.tick(10.0), None);
    }

    #[test]
    fn finish_outside_a_mission_is_ignored() {
        let mut s = Story::new();
        s.finish(true);
        assert_eq!(s.scene(), Scene::Title);
        assert!(s.emotions().is_empty());
    }
}
