/*!
Polled pointer and keyboard state.

Left control is the drag/resize modifier. A console host cannot see wheel
messages for another window, so ctrl with `+`/`-` stands in for scrolling.
*/

#![allow(unsafe_code)]

use perch::PointerInput;
use windows::Win32::UI::Input::KeyboardAndMouse::{
  GetAsyncKeyState, VIRTUAL_KEY, VK_ADD, VK_LBUTTON, VK_LCONTROL, VK_OEM_MINUS, VK_OEM_PLUS,
  VK_SUBTRACT,
};

fn is_down(key: VIRTUAL_KEY) -> bool {
  unsafe { GetAsyncKeyState(i32::from(key.0)) < 0 }
}

/// Edge detection for the primary button across polls.
#[derive(Debug, Default)]
pub(crate) struct InputPoller {
  primary_was_down: bool,
}

impl InputPoller {
  pub(crate) fn poll(&mut self) -> PointerInput {
    let primary_held = is_down(VK_LBUTTON);
    let primary_pressed = primary_held && !self.primary_was_down;
    self.primary_was_down = primary_held;

    let scroll = if is_down(VK_OEM_PLUS) || is_down(VK_ADD) {
      1.0
    } else if is_down(VK_OEM_MINUS) || is_down(VK_SUBTRACT) {
      -1.0
    } else {
      0.0
    };

    PointerInput {
      primary_pressed,
      primary_held,
      modifier_held: is_down(VK_LCONTROL),
      scroll,
    }
  }
}
