use dotmatrix_common::app::App;
use dotmatrix_common::key::Key;

use crate::machine::{Button, GameBoy};
use crate::{SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH};

/// Frames between status lines.
const STATUS_INTERVAL: u64 = 60;

/// Host-facing wrapper that lets a presentation layer drive a [`GameBoy`]
/// through the shared `App` trait.
pub struct GameBoyApp {
    pub gb: GameBoy,
    should_exit: bool,
    frame_counter: u64,
    last_lcdc: u8,
}

impl GameBoyApp {
    pub fn new(gb: GameBoy) -> Self {
        Self {
            gb,
            should_exit: false,
            frame_counter: 0,
            last_lcdc: 0,
        }
    }

    fn log_status(&mut self) {
        let lcdc = self.gb.mmu.ppu.read_register(0xFF40).unwrap_or(0);
        if lcdc != self.last_lcdc {
            log::debug!("GB LCDC changed: 0x{:02X} -> 0x{:02X}", self.last_lcdc, lcdc);
            self.last_lcdc = lcdc;
        }

        if self.frame_counter == 1 || self.frame_counter % STATUS_INTERVAL == 0 {
            let regs = &self.gb.cpu.regs;
            log::info!(
                "GB: frame={} pc=0x{:04X} sp=0x{:04X} af=0x{:04X} bc=0x{:04X} de=0x{:04X} hl=0x{:04X} ime={} state={:?} IF=0x{:02X} IE=0x{:02X} LCDC=0x{:02X} LY={}",
                self.frame_counter,
                regs.pc,
                regs.sp,
                regs.af(),
                regs.bc(),
                regs.de(),
                regs.hl(),
                self.gb.cpu.ime,
                self.gb.cpu.state,
                self.gb.mmu.interrupts.read_if(),
                self.gb.mmu.interrupts.enable,
                lcdc,
                self.gb.mmu.ppu.ly(),
            );
        }
    }
}

/// Keyboard layout: arrows are the D-pad, Z/X are A/B, A/S are
/// Select/Start.
fn button_for(key: Key) -> Option<Button> {
    match key {
        Key::Right => Some(Button::Right),
        Key::Left => Some(Button::Left),
        Key::Up => Some(Button::Up),
        Key::Down => Some(Button::Down),
        Key::Z => Some(Button::A),
        Key::X => Some(Button::B),
        Key::A => Some(Button::Select),
        Key::S => Some(Button::Start),
        _ => None,
    }
}

impl App for GameBoyApp {
    fn init(&mut self) {
        log::info!("Game Boy init: {:?}", self.gb.title());
    }

    fn update(&mut self, screen_state: &mut [u8]) {
        if self.should_exit {
            return;
        }
        if let Err(err) = self.gb.step() {
            log::error!("GB: emulation stopped: {err}");
            self.should_exit = true;
            return;
        }
        self.frame_counter = self.frame_counter.wrapping_add(1);

        for (rgb, rgba) in screen_state
            .chunks_exact_mut(3)
            .zip(self.gb.frame_buffer().chunks_exact(4))
        {
            rgb.copy_from_slice(&rgba[..3]);
        }

        self.log_status();
    }

    fn handle_key_event(&mut self, key: Key, is_pressed: bool) {
        log::debug!("GB key event: {:?} pressed={}", key, is_pressed);
        if key == Key::Escape && is_pressed {
            self.should_exit = true;
            return;
        }
        if let Some(button) = button_for(key) {
            if is_pressed {
                self.gb.press(button);
            } else {
                self.gb.release(button);
            }
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("Game Boy exit after {} frames", self.frame_counter);
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        match self.gb.title() {
            "" => "dotmatrix".to_string(),
            title => format!("dotmatrix - {title}"),
        }
    }
}
