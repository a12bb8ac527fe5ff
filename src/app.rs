use crate::error::MazeError;
use crate::input::Input;
use crate::missions::{GoalRule, Mission, Outcome};
use crate::render::Frame;
use crate::story::{Cue, Scene, Story};
use crate::view;
use rand::Rng;
use std::time::Instant;

/// Story progress plus whichever mission is running.
pub struct App {
    story: Story,
    mission: Option<Mission>,
    goal_rule: GoalRule,
}

impl App {
    pub fn new(goal_rule: GoalRule) -> Self {
        Self {
            story: Story::new(),
            mission: None,
            goal_rule,
        }
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    /// Advances one fixed step. Fails only if a maze cannot be carved.
    pub fn tick(
        &mut self,
        input: &mut Input,
        now: Instant,
        dt: f32,
        rng: &mut impl Rng,
    ) -> Result<(), MazeError> {
        if input.take_confirm() {
            self.story.confirm();
        }
        let controls = input.controls(now);

        if let Some(Cue::StartMission(day)) = self.story.tick(dt) {
            self.mission = Some(Mission::for_day(day, self.goal_rule, rng)?);
        }

        let outcome = match (self.story.scene(), self.mission.as_mut()) {
            (Scene::Playing(_), Some(mission)) => mission.step(&controls, dt, rng),
            _ => Outcome::Running,
        };
        match outcome {
            Outcome::Running => {}
            Outcome::Won => self.end_mission(true),
            Outcome::Lost => self.end_mission(false),
        }
        Ok(())
    }

    fn end_mission(&mut self, won: bool) {
        self.story.finish(won);
        self.mission = None;
    }

    pub fn draw(&self, frame: &mut Frame) {
        view::draw(frame, &self.story, self.mission.as_ref());
    }
}
