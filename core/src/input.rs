#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buttons {
    Up,
    Down,
    Select,
    Cancel,
}

impl Buttons {
    pub const ALL: [Buttons; 4] = [Buttons::Up, Buttons::Down, Buttons::Select, Buttons::Cancel];

    pub fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

#[derive(Clone, Copy, Default)]
pub struct ButtonState {
    current: u8,
    previous: u8,
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, current: u8) {
        self.previous = self.current;
        self.current = current;
    }

    fn held(&self) -> u8 {
        self.current & self.previous
    }

    fn pressed(&self) -> u8 {
        self.current & !self.previous
    }

    fn released(&self) -> u8 {
        !self.current & self.previous
    }

    pub fn is_held(&self, button: Buttons) -> bool {
        (self.held() & button.mask()) != 0
    }

    pub fn is_pressed(&self, button: Buttons) -> bool {
        (self.pressed() & button.mask()) != 0
    }

    pub fn is_released(&self, button: Buttons) -> bool {
        (self.released() & button.mask()) != 0
    }

    pub fn any_pressed(&self) -> bool {
        self.pressed() != 0
    }
}

/// A press waiting in the application's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPress {
    pub button: Buttons,
}

impl ButtonPress {
    pub fn new(button: Buttons) -> Self {
        Self { button }
    }

    pub fn is_direction(&self) -> bool {
        matches!(self.button, Buttons::Up | Buttons::Down)
    }

    pub fn is_action(&self) -> bool {
        matches!(self.button, Buttons::Select | Buttons::Cancel)
    }
}
