//! HUD counters.  Each one only changes through the collision rules in
//! `collision`; `text()` renders the label on demand.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Scores never go down.
    pub fn add(&mut self, points: u32) {
        self.value = self.value.saturating_add(points);
    }

    pub fn text(&self) -> String {
        format!("Score: {}", self.value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossHp {
    value: u32,
}

impl BossHp {
    pub fn new(value: u32) -> Self {
        BossHp { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Remove `amount` HP, stopping at zero.  Returns the HP left.
    pub fn hit(&mut self, amount: u32) -> u32 {
        self.value = self.value.saturating_sub(amount);
        self.value
    }

    pub fn is_depleted(&self) -> bool {
        self.value == 0
    }

    pub fn text(&self) -> String {
        format!("Boss HP: {}", self.value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lives {
    value: u32,
}

impl Lives {
    pub fn new(value: u32) -> Self {
        Lives { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn gain(&mut self) {
        self.value = self.value.saturating_add(1);
    }

    pub fn lose(&mut self) {
        self.value = self.value.saturating_sub(1);
    }

    pub fn is_exhausted(&self) -> bool {
        self.value == 0
    }

    pub fn text(&self) -> String {
        format!("HP: {}", self.value)
    }
}
