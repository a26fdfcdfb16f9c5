//! The semantics of every instruction.
//!
//! Each operation runs after the fetch, so `state.pc` already points at the
//! following instruction. Fallible operations check every memory or stack
//! access before mutating anything.

use log::debug;

use crate::constants::GLYPH_SIZE;
use crate::error::ExecutionError;
use crate::instruction::Cycle;
use crate::keypad::Keypad;
use crate::state::{RunState, State};

const VF: usize = 0xF;

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc += 0x2;
    }
}

fn key_pressed(keys: &Keypad, key: u8) -> Result<bool, ExecutionError> {
    keys.is_pressed(key).ok_or(ExecutionError::InvalidKey { key })
}

/// ignored
pub fn sys(addr: u16) {
    debug!("ignoring machine code routine at {:#05X}", addr);
}

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer.clear();
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<(), ExecutionError> {
    state.pc = state.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<(), ExecutionError> {
    let pc = state.pc;
    state.push(pc)?;
    state.pc = addr;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: u8, kk: u8) {
    let skip = state.v[x as usize] == kk;
    skip_if(state, skip);
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: u8, kk: u8) {
    let skip = state.v[x as usize] != kk;
    skip_if(state, skip);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) {
    let skip = state.v[x as usize] == state.v[y as usize];
    skip_if(state, skip);
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = kk;
}

/// Vx += kk
/// Overflow is dropped and VF is left alone
pub fn add(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] = state.v[y as usize];
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] |= state.v[y as usize];
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] &= state.v[y as usize];
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] ^= state.v[y as usize];
}

/// Vx += Vy; VF = carry
pub fn addv(state: &mut State, x: u8, y: u8) {
    let (res, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[VF] = carry as u8;
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &mut State, x: u8, y: u8) {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[x as usize] = vx.wrapping_sub(vy);
    state.v[VF] = (vx > vy) as u8;
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    state.v[x as usize] = vx >> 1;
    state.v[VF] = vx & 0x1;
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(state: &mut State, x: u8, y: u8) {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[x as usize] = vy.wrapping_sub(vx);
    state.v[VF] = (vy > vx) as u8;
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    state.v[x as usize] = vx << 1;
    state.v[VF] = vx >> 7;
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: u8, y: u8) {
    let skip = state.v[x as usize] != state.v[y as usize];
    skip_if(state, skip);
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) {
    state.i = addr;
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) {
    state.pc = addr + u16::from(state.v[0x0]);
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, x: u8, kk: u8) {
    let rand_byte: u8 = rand::random();
    state.v[x as usize] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite at memory I..I+n onto the FrameBuffer with wrapping.
/// Sets VF if any pixel was erased
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<(), ExecutionError> {
    let sprite = state.memory.slice(state.i, n as usize)?;
    let collision = state
        .frame_buffer
        .draw_sprite(state.v[x as usize], state.v[y as usize], sprite);
    state.v[VF] = collision as u8;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: u8, keys: &Keypad) -> Result<(), ExecutionError> {
    let pressed = key_pressed(keys, state.v[x as usize])?;
    skip_if(state, pressed);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: u8, keys: &Keypad) -> Result<(), ExecutionError> {
    let pressed = key_pressed(keys, state.v[x as usize])?;
    skip_if(state, !pressed);
    Ok(())
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) {
    state.v[x as usize] = state.timers.delay;
}

/// await keypress for Vx
/// Completes at once if a key is already held, otherwise blocks the CPU
pub fn keyd(state: &mut State, x: u8, keys: &Keypad) -> Cycle {
    match keys.first_pressed() {
        Some(key) => {
            state.v[x as usize] = key;
            Cycle::Continue
        }
        None => {
            debug!("V{:X} awaiting a key press", x);
            state.run_state = RunState::AwaitingKey(x);
            Cycle::Blocked
        }
    }
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) {
    state.timers.delay = state.v[x as usize];
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) {
    state.timers.sound = state.v[x as usize];
}

/// I += Vx
pub fn addi(state: &mut State, x: u8) {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
}

/// I = Vx * 5
/// Set I to the memory address of the glyph for Vx
/// See constants::SPRITE_SHEET
pub fn ldspr(state: &mut State, x: u8) {
    state.i = u16::from(state.v[x as usize]) * GLYPH_SIZE;
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(state: &mut State, x: u8) -> Result<(), ExecutionError> {
    let vx = state.v[x as usize];
    state
        .memory
        .slice_mut(state.i, 3)?
        .copy_from_slice(&[vx / 100, vx / 10 % 10, vx % 10]);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: u8) -> Result<(), ExecutionError> {
    let count = x as usize + 1;
    state
        .memory
        .slice_mut(state.i, count)?
        .copy_from_slice(&state.v[..count]);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: u8) -> Result<(), ExecutionError> {
    let count = x as usize + 1;
    let bytes = state.memory.slice(state.i, count)?;
    state.v[..count].copy_from_slice(bytes);
    Ok(())
}
