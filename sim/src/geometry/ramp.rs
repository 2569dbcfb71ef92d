use serde::{Deserialize, Serialize};

use super::types::{Vec3, overlaps_open};

/// Horizontal direction a ramp's run follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    PosX,
    NegX,
    PosZ,
    NegZ,
}

impl Heading {
    /// Signed distance of `p` from `origin` along the heading.
    #[inline]
    fn along(self, origin: &Vec3, p: &Vec3) -> f32 {
        match self {
            Heading::PosX => p.x - origin.x,
            Heading::NegX => origin.x - p.x,
            Heading::PosZ => p.z - origin.z,
            Heading::NegZ => origin.z - p.z,
        }
    }

    /// Offset of `p` from `origin` across the heading (toward +z for x headings, +x otherwise).
    #[inline]
    fn across(self, origin: &Vec3, p: &Vec3) -> f32 {
        match self {
            Heading::PosX | Heading::NegX => p.z - origin.z,
            Heading::PosZ | Heading::NegZ => p.x - origin.x,
        }
    }
}

/// Staircase with discrete steps.
///
/// Step `i` covers `[i * step_run, (i + 1) * step_run)` along the heading, measured from
/// `start`. Ascending steps stand at `start.y + (i + 1) * step_rise`; descending ones at
/// `start.y - i * step_rise`. The ramp is `width` wide across the heading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    pub start: Vec3,
    pub heading: Heading,
    pub step_count: u32,
    pub step_run: f32,
    pub step_rise: f32,
    pub width: f32,
    pub ascending: bool,
}

impl Ramp {
    pub fn new(
        start: Vec3,
        heading: Heading,
        step_count: u32,
        width: f32,
        ascending: bool,
        step_run: f32,
        step_rise: f32,
    ) -> Self {
        Self {
            start,
            heading,
            step_count,
            step_run,
            step_rise,
            width,
            ascending,
        }
    }

    #[inline]
    pub fn run_length(&self) -> f32 {
        self.step_count as f32 * self.step_run
    }

    /// Height of the top of step `index`.
    #[inline]
    pub fn step_height(&self, index: u32) -> f32 {
        if self.ascending {
            self.start.y + (index + 1) as f32 * self.step_rise
        } else {
            self.start.y - index as f32 * self.step_rise
        }
    }

    /// Range of step indices touched by a footprint of `radius` around `point`.
    pub fn steps_under(&self, point: &Vec3, radius: f32) -> Option<(u32, u32)> {
        if self.step_count == 0 || self.step_run <= 0.0 {
            return None;
        }
        let across = self.heading.across(&self.start, point);
        if !overlaps_open(across, radius, 0.0, self.width) {
            return None;
        }
        let along = self.heading.along(&self.start, point);
        if !overlaps_open(along, radius, 0.0, self.run_length()) {
            return None;
        }

        let last = self.step_count as i64 - 1;
        let first = (((along - radius) / self.step_run).floor() as i64).clamp(0, last);
        let end = ((((along + radius) / self.step_run).ceil() as i64) - 1).clamp(0, last);
        (first <= end).then_some((first as u32, end as u32))
    }

    /// Highest step height under a footprint of `radius` around `point`.
    pub fn height_at(&self, point: &Vec3, radius: f32) -> Option<f32> {
        let (first, last) = self.steps_under(point, radius)?;
        let index = if self.ascending { last } else { first };
        Some(self.step_height(index))
    }
}
