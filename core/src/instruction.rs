use crate::error::ExecutionError;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::peripherals::KeyScanner;
use crate::state::State;

/// What the driver should do after a single step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cycle {
    Continue,
    /// The frame buffer changed and should be rendered
    Draw,
    /// The CPU is waiting on a key press
    Blocked,
    /// The program asked the emulator to quit
    Exit,
}

/// A decoded instruction and its operands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 0nnn: legacy machine code routine, ignored
    System { addr: u16 },
    Clear,
    Return,
    Exit,
    Jump { addr: u16 },
    Call { addr: u16 },
    SkipEqual { x: u8, kk: u8 },
    SkipNotEqual { x: u8, kk: u8 },
    SkipRegEqual { x: u8, y: u8 },
    Load { x: u8, kk: u8 },
    Add { x: u8, kk: u8 },
    Move { x: u8, y: u8 },
    Or { x: u8, y: u8 },
    And { x: u8, y: u8 },
    Xor { x: u8, y: u8 },
    AddReg { x: u8, y: u8 },
    Sub { x: u8, y: u8 },
    ShiftRight { x: u8 },
    SubN { x: u8, y: u8 },
    ShiftLeft { x: u8 },
    SkipRegNotEqual { x: u8, y: u8 },
    LoadI { addr: u16 },
    JumpV0 { addr: u16 },
    Random { x: u8, kk: u8 },
    Draw { x: u8, y: u8, n: u8 },
    SkipPressed { x: u8 },
    SkipNotPressed { x: u8 },
    LoadDelay { x: u8 },
    AwaitKey { x: u8 },
    SetDelay { x: u8 },
    SetSound { x: u8 },
    AddI { x: u8 },
    LoadSprite { x: u8 },
    StoreBcd { x: u8 },
    Store { x: u8 },
    Read { x: u8 },
}

impl Instruction {
    /// Selects the Instruction for a given Opcode
    pub fn decode(op: Opcode) -> Result<Self, ExecutionError> {
        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.nnn());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clear,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x0, 0x0, 0xF, 0xD) => Instruction::Exit,
            (0x0, ..) => Instruction::System { addr },
            (0x1, ..) => Instruction::Jump { addr },
            (0x2, ..) => Instruction::Call { addr },
            (0x3, ..) => Instruction::SkipEqual { x, kk },
            (0x4, ..) => Instruction::SkipNotEqual { x, kk },
            (0x5, .., 0x0) => Instruction::SkipRegEqual { x, y },
            (0x6, ..) => Instruction::Load { x, kk },
            (0x7, ..) => Instruction::Add { x, kk },
            (0x8, .., 0x0) => Instruction::Move { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddReg { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::ShiftRight { x },
            (0x8, .., 0x7) => Instruction::SubN { x, y },
            (0x8, .., 0xE) => Instruction::ShiftLeft { x },
            (0x9, .., 0x0) => Instruction::SkipRegNotEqual { x, y },
            (0xA, ..) => Instruction::LoadI { addr },
            (0xB, ..) => Instruction::JumpV0 { addr },
            (0xC, ..) => Instruction::Random { x, kk },
            (0xD, ..) => Instruction::Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => Instruction::SkipPressed { x },
            (0xE, _, 0xA, 0x1) => Instruction::SkipNotPressed { x },
            (0xF, _, 0x0, 0x7) => Instruction::LoadDelay { x },
            (0xF, _, 0x0, 0xA) => Instruction::AwaitKey { x },
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay { x },
            (0xF, _, 0x1, 0x8) => Instruction::SetSound { x },
            (0xF, _, 0x1, 0xE) => Instruction::AddI { x },
            (0xF, _, 0x2, 0x9) => Instruction::LoadSprite { x },
            (0xF, _, 0x3, 0x3) => Instruction::StoreBcd { x },
            (0xF, _, 0x5, 0x5) => Instruction::Store { x },
            (0xF, _, 0x6, 0x5) => Instruction::Read { x },
            _ => return Err(ExecutionError::UnimplementedOpcode { opcode: op.0 }),
        };
        Ok(instruction)
    }

    /// Applies the instruction to `state`, whose pc already points past it
    pub fn execute(
        self,
        state: &mut State,
        keys: &mut dyn KeyScanner,
    ) -> Result<Cycle, ExecutionError> {
        match self {
            Instruction::System { addr } => sys(addr),
            Instruction::Clear => clr(state),
            Instruction::Return => rts(state)?,
            Instruction::Exit => return Ok(Cycle::Exit),
            Instruction::Jump { addr } => jump(state, addr),
            Instruction::Call { addr } => call(state, addr)?,
            Instruction::SkipEqual { x, kk } => ske(state, x, kk),
            Instruction::SkipNotEqual { x, kk } => skne(state, x, kk),
            Instruction::SkipRegEqual { x, y } => skre(state, x, y),
            Instruction::Load { x, kk } => load(state, x, kk),
            Instruction::Add { x, kk } => add(state, x, kk),
            Instruction::Move { x, y } => mv(state, x, y),
            Instruction::Or { x, y } => or(state, x, y),
            Instruction::And { x, y } => and(state, x, y),
            Instruction::Xor { x, y } => xor(state, x, y),
            Instruction::AddReg { x, y } => addv(state, x, y),
            Instruction::Sub { x, y } => sub(state, x, y),
            Instruction::ShiftRight { x } => shr(state, x),
            Instruction::SubN { x, y } => subn(state, x, y),
            Instruction::ShiftLeft { x } => shl(state, x),
            Instruction::SkipRegNotEqual { x, y } => skrne(state, x, y),
            Instruction::LoadI { addr } => loadi(state, addr),
            Instruction::JumpV0 { addr } => jumpi(state, addr),
            Instruction::Random { x, kk } => rand(state, x, kk),
            Instruction::Draw { x, y, n } => {
                draw(state, x, y, n)?;
                return Ok(Cycle::Draw);
            }
            Instruction::SkipPressed { x } => skpr(state, x, &keys.scan())?,
            Instruction::SkipNotPressed { x } => skup(state, x, &keys.scan())?,
            Instruction::LoadDelay { x } => moved(state, x),
            Instruction::AwaitKey { x } => return Ok(keyd(state, x, &keys.scan())),
            Instruction::SetDelay { x } => loads(state, x),
            Instruction::SetSound { x } => ld(state, x),
            Instruction::AddI { x } => addi(state, x),
            Instruction::LoadSprite { x } => ldspr(state, x),
            Instruction::StoreBcd { x } => bcd(state, x)?,
            Instruction::Store { x } => stor(state, x)?,
            Instruction::Read { x } => read(state, x)?,
        }
        Ok(Cycle::Continue)
    }
}
