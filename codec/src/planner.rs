use sketch_model::{Axis, Instruction, Position, DATA_BITS, DATA_MAX, MAX_DELTA, MIN_DELTA};

use crate::sketch_writer::SketchWriter;

/// Beyond this coordinate a single data chunk plus one move can no longer
/// reach the target, so the absolute form needs two chunks.
const SINGLE_CHUNK_REACH: u8 = DATA_MAX + MAX_DELTA as u8;

/// Whether `delta` can be covered by at most `steps` relative moves.
fn within_steps(delta: i32, steps: i32) -> bool {
    (MIN_DELTA * steps..=MAX_DELTA * steps).contains(&delta)
}

impl SketchWriter {
    /// Moves the target by `delta` along `axis` using the fewest relative steps.
    ///
    /// A zero move on Y still emits `DY 0`, as that is what commits the
    /// current target and any pending draw.
    pub fn move_by(&mut self, delta: i32, axis: Axis) {
        if delta == 0 && axis == Axis::Y {
            self.push(Instruction::MoveY(0));
            return;
        }

        let mut remaining = delta;
        while remaining != 0 {
            let step = remaining.clamp(MIN_DELTA, MAX_DELTA);
            remaining -= step;
            self.push(axis.step(step as i8));
        }
    }

    /// Sets the target on `axis` to the absolute coordinate `pos`.
    pub fn set_absolute(&mut self, pos: u8, axis: Axis) {
        if pos > SINGLE_CHUNK_REACH {
            // 3-4 bytes
            self.push(Instruction::Data(pos >> DATA_BITS));
            self.push(Instruction::Data(pos & DATA_MAX));
            self.tool(axis.target_tool());
            if axis == Axis::Y {
                self.push(Instruction::MoveY(0));
            }
        } else if pos > MAX_DELTA as u8 {
            // 2-3 bytes
            let chunk = pos.min(DATA_MAX);
            self.push(Instruction::Data(chunk));
            self.tool(axis.target_tool());
            self.move_by(i32::from(pos - chunk), axis);
        } else {
            // 1-2 bytes: the empty accumulator resets the target to 0
            self.tool(axis.target_tool());
            self.move_by(i32::from(pos), axis);
        }
    }

    /// Moves the cursor from `current` to `next` with the cheapest sequence,
    /// then records `next` as the new cursor.
    ///
    /// While a block is being drawn, Y may only change through a single move
    /// or an absolute set: every `DY` commits a rectangle, so splitting the
    /// displacement would fill several partial ones.
    pub fn change_position(&mut self, current: &mut Position, next: Position, block_draw: bool) {
        let dx = i32::from(next.x) - i32::from(current.x);
        let dy = i32::from(next.y) - i32::from(current.y);

        if within_steps(dx, 1) {
            self.move_by(dx, Axis::X);
        } else if next.x <= DATA_MAX {
            self.set_absolute(next.x, Axis::X);
        } else if within_steps(dx, 2) {
            self.move_by(dx, Axis::X);
        } else {
            self.set_absolute(next.x, Axis::X);
        }

        if within_steps(dy, 1) {
            self.move_by(dy, Axis::Y);
        } else if !block_draw && within_steps(dy, 3) {
            self.move_by(dy, Axis::Y);
        } else {
            self.set_absolute(next.y, Axis::Y);
        }

        *current = next;
    }
}
