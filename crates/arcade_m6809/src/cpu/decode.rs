//! Opcode decode tables.
//!
//! One 768-entry table covers the base page (0x00–0xFF), the 0x10 page
//! (indices 0x100–0x1FF) and the 0x11 page (0x200–0x2FF). Lengths and cycle
//! counts are the figures from the MC6809 data sheet; lengths of escape-page
//! instructions include the prefix byte.

use super::regs::RegisterId;

pub const PAGE1_PREFIX: u8 = 0x10;
pub const PAGE2_PREFIX: u8 = 0x11;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    Inherent,
    Immediate8,
    Immediate16,
    Direct,
    Extended,
    Indexed,
    Relative8,
    Relative16,
}

/// Read-modify-write operations shared by the memory, A and B forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unary {
    Neg,
    Com,
    Lsr,
    Ror,
    Asr,
    Asl,
    Rol,
    Dec,
    Inc,
    Tst,
    Clr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    A,
    B,
    Memory,
}

/// Two-operand accumulator operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alu {
    Sub,
    Cmp,
    Sbc,
    And,
    Bit,
    Ld,
    Eor,
    Adc,
    Or,
    Add,
}

/// Branch predicate, numbered like the low nibble of the branch opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    Always,
    Never,
    Hi,
    Ls,
    Cc,
    Cs,
    Ne,
    Eq,
    Vc,
    Vs,
    Pl,
    Mi,
    Ge,
    Lt,
    Gt,
    Le,
}

impl Cond {
    pub const fn from_low_nibble(opcode: u8) -> Self {
        match opcode & 0x0F {
            0x0 => Cond::Always,
            0x1 => Cond::Never,
            0x2 => Cond::Hi,
            0x3 => Cond::Ls,
            0x4 => Cond::Cc,
            0x5 => Cond::Cs,
            0x6 => Cond::Ne,
            0x7 => Cond::Eq,
            0x8 => Cond::Vc,
            0x9 => Cond::Vs,
            0xA => Cond::Pl,
            0xB => Cond::Mi,
            0xC => Cond::Ge,
            0xD => Cond::Lt,
            0xE => Cond::Gt,
            _ => Cond::Le,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stack {
    S,
    U,
}

/// Handler tag for one table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Illegal,
    Nop,
    Sync,
    Unary(Unary, Target),
    Jmp,
    Alu(Alu, Target),
    St(Target),
    AddD,
    SubD,
    Cmp16(RegisterId),
    Ld16(RegisterId),
    St16(RegisterId),
    Branch(Cond),
    LongBranch(Cond),
    Bsr,
    Jsr,
    Rts,
    Lea(RegisterId),
    Abx,
    Push(Stack),
    Pull(Stack),
    Tfr,
    Exg,
    Daa,
    Mul,
    Sex,
    Andcc,
    Orcc,
    Cwai,
    Rti,
    Swi,
    Swi2,
    Swi3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeEntry {
    pub op: Op,
    /// Instruction bytes, including any page prefix but excluding indexed
    /// offset bytes, which the resolver consumes itself.
    pub length: u8,
    pub mode: AddressingMode,
    pub cycles: u8,
}

const fn entry(op: Op, length: u8, mode: AddressingMode, cycles: u8) -> DecodeEntry {
    DecodeEntry {
        op,
        length,
        mode,
        cycles,
    }
}

pub const ILLEGAL: DecodeEntry = entry(Op::Illegal, 1, AddressingMode::Inherent, 1);

pub static DECODE_TABLE: [DecodeEntry; 768] = build_table();

/// Table index for the instruction in `buf`: the opcode itself on the base
/// page, `0x100 + opcode` after a 0x10 prefix, `0x200 + opcode` after 0x11.
pub fn table_index(buf: &[u8]) -> usize {
    match buf[0] {
        PAGE1_PREFIX => 0x100 + buf[1] as usize,
        PAGE2_PREFIX => 0x200 + buf[1] as usize,
        op => op as usize,
    }
}

pub fn lookup(index: usize) -> &'static DecodeEntry {
    &DECODE_TABLE[index]
}

const fn build_table() -> [DecodeEntry; 768] {
    let mut table = [ILLEGAL; 768];
    let mut i = 0;
    while i < 256 {
        let op = i as u8;
        table[i] = base_entry(op);
        table[0x100 + i] = page1_entry(op);
        table[0x200 + i] = page2_entry(op);
        i += 1;
    }
    table
}

const fn unary_for(low: u8) -> Option<Unary> {
    match low {
        0x0 => Some(Unary::Neg),
        0x3 => Some(Unary::Com),
        0x4 => Some(Unary::Lsr),
        0x6 => Some(Unary::Ror),
        0x7 => Some(Unary::Asr),
        0x8 => Some(Unary::Asl),
        0x9 => Some(Unary::Rol),
        0xA => Some(Unary::Dec),
        0xC => Some(Unary::Inc),
        0xD => Some(Unary::Tst),
        0xF => Some(Unary::Clr),
        _ => None,
    }
}

const fn alu_for(low: u8) -> Option<Alu> {
    match low {
        0x0 => Some(Alu::Sub),
        0x1 => Some(Alu::Cmp),
        0x2 => Some(Alu::Sbc),
        0x4 => Some(Alu::And),
        0x5 => Some(Alu::Bit),
        0x6 => Some(Alu::Ld),
        0x8 => Some(Alu::Eor),
        0x9 => Some(Alu::Adc),
        0xA => Some(Alu::Or),
        0xB => Some(Alu::Add),
        _ => None,
    }
}

/// Column of the 0x80–0xFF half of the map: immediate, direct, indexed,
/// extended. Returns the mode and the instruction length.
const fn column(high: u8, wide_immediate: bool) -> (AddressingMode, u8) {
    match high & 0x3 {
        0 if wide_immediate => (AddressingMode::Immediate16, 3),
        0 => (AddressingMode::Immediate8, 2),
        1 => (AddressingMode::Direct, 2),
        2 => (AddressingMode::Indexed, 2),
        _ => (AddressingMode::Extended, 3),
    }
}

/// Cycle counts for the four columns, indexed by `high & 3`.
const fn column_cycles(high: u8, cycles: [u8; 4]) -> u8 {
    cycles[(high & 0x3) as usize]
}

const fn base_entry(op: u8) -> DecodeEntry {
    use AddressingMode::*;

    let high = op >> 4;
    let low = op & 0x0F;

    match high {
        0x0 | 0x4 | 0x5 | 0x6 | 0x7 => {
            let (target, mode, length, cycles, jmp_cycles) = match high {
                0x0 => (Target::Memory, Direct, 2, 6, 3),
                0x4 => (Target::A, Inherent, 1, 2, 0),
                0x5 => (Target::B, Inherent, 1, 2, 0),
                0x6 => (Target::Memory, Indexed, 2, 6, 3),
                _ => (Target::Memory, Extended, 3, 7, 4),
            };
            if low == 0xE {
                return match target {
                    Target::Memory => entry(Op::Jmp, length, mode, jmp_cycles),
                    _ => ILLEGAL,
                };
            }
            match unary_for(low) {
                Some(unary) => entry(Op::Unary(unary, target), length, mode, cycles),
                None => ILLEGAL,
            }
        }
        0x1 => match op {
            // 0x10 and 0x11 select the escape pages and never index this page.
            0x12 => entry(Op::Nop, 1, Inherent, 2),
            0x13 => entry(Op::Sync, 1, Inherent, 4),
            0x16 => entry(Op::LongBranch(Cond::Always), 3, Relative16, 5),
            0x17 => entry(Op::Bsr, 3, Relative16, 9),
            0x19 => entry(Op::Daa, 1, Inherent, 2),
            0x1A => entry(Op::Orcc, 2, Immediate8, 3),
            0x1C => entry(Op::Andcc, 2, Immediate8, 3),
            0x1D => entry(Op::Sex, 1, Inherent, 2),
            0x1E => entry(Op::Exg, 2, Immediate8, 8),
            0x1F => entry(Op::Tfr, 2, Immediate8, 6),
            _ => ILLEGAL,
        },
        0x2 => entry(Op::Branch(Cond::from_low_nibble(op)), 2, Relative8, 3),
        0x3 => match op {
            0x30 => entry(Op::Lea(RegisterId::X), 2, Indexed, 4),
            0x31 => entry(Op::Lea(RegisterId::Y), 2, Indexed, 4),
            0x32 => entry(Op::Lea(RegisterId::S), 2, Indexed, 4),
            0x33 => entry(Op::Lea(RegisterId::U), 2, Indexed, 4),
            0x34 => entry(Op::Push(Stack::S), 2, Immediate8, 5),
            0x35 => entry(Op::Pull(Stack::S), 2, Immediate8, 5),
            0x36 => entry(Op::Push(Stack::U), 2, Immediate8, 5),
            0x37 => entry(Op::Pull(Stack::U), 2, Immediate8, 5),
            0x39 => entry(Op::Rts, 1, Inherent, 5),
            0x3A => entry(Op::Abx, 1, Inherent, 3),
            0x3B => entry(Op::Rti, 1, Inherent, 6),
            0x3C => entry(Op::Cwai, 2, Immediate8, 20),
            0x3D => entry(Op::Mul, 1, Inherent, 11),
            0x3F => entry(Op::Swi, 1, Inherent, 19),
            _ => ILLEGAL,
        },
        _ => accumulator_entry(op),
    }
}

/// 0x80–0xFF: the A side (0x8x–0xBx) and the B side (0xCx–0xFx).
const fn accumulator_entry(op: u8) -> DecodeEntry {
    let high = op >> 4;
    let low = op & 0x0F;
    let side_a = high < 0xC;
    let acc = if side_a { Target::A } else { Target::B };
    let immediate = high & 0x3 == 0;

    if let Some(alu) = alu_for(low) {
        let (mode, length) = column(high, false);
        return entry(
            Op::Alu(alu, acc),
            length,
            mode,
            column_cycles(high, [2, 4, 4, 5]),
        );
    }

    match (low, side_a) {
        (0x7, _) if !immediate => {
            let (mode, length) = column(high, false);
            entry(Op::St(acc), length, mode, column_cycles(high, [0, 4, 4, 5]))
        }
        (0x3, true) => wide(Op::SubD, high, [4, 6, 6, 7]),
        (0x3, false) => wide(Op::AddD, high, [4, 6, 6, 7]),
        (0xC, true) => wide(Op::Cmp16(RegisterId::X), high, [4, 6, 6, 7]),
        (0xC, false) => wide(Op::Ld16(RegisterId::D), high, [3, 5, 5, 6]),
        (0xD, true) if immediate => entry(Op::Bsr, 2, AddressingMode::Relative8, 7),
        (0xD, true) => wide(Op::Jsr, high, [0, 7, 7, 8]),
        (0xD, false) if !immediate => wide(Op::St16(RegisterId::D), high, [0, 5, 5, 6]),
        (0xE, true) => wide(Op::Ld16(RegisterId::X), high, [3, 5, 5, 6]),
        (0xE, false) => wide(Op::Ld16(RegisterId::U), high, [3, 5, 5, 6]),
        (0xF, true) if !immediate => wide(Op::St16(RegisterId::X), high, [0, 5, 5, 6]),
        (0xF, false) if !immediate => wide(Op::St16(RegisterId::U), high, [0, 5, 5, 6]),
        _ => ILLEGAL,
    }
}

const fn wide(op: Op, high: u8, cycles: [u8; 4]) -> DecodeEntry {
    let (mode, length) = column(high, true);
    entry(op, length, mode, column_cycles(high, cycles))
}

/// Same shape as a base-page entry, one byte and one cycle longer.
const fn prefixed(base: DecodeEntry) -> DecodeEntry {
    entry(base.op, base.length + 1, base.mode, base.cycles + 1)
}

const fn page1_entry(op: u8) -> DecodeEntry {
    let high = op >> 4;
    let low = op & 0x0F;

    match (high, low) {
        (0x2, 0x1..=0xF) => entry(
            Op::LongBranch(Cond::from_low_nibble(op)),
            4,
            AddressingMode::Relative16,
            5,
        ),
        (0x3, 0xF) => entry(Op::Swi2, 2, AddressingMode::Inherent, 20),
        (0x8..=0xB, 0x3) => prefixed(wide(Op::Cmp16(RegisterId::D), high, [4, 6, 6, 7])),
        (0x8..=0xB, 0xC) => prefixed(wide(Op::Cmp16(RegisterId::Y), high, [4, 6, 6, 7])),
        (0x8..=0xB, 0xE) => prefixed(wide(Op::Ld16(RegisterId::Y), high, [3, 5, 5, 6])),
        (0x9..=0xB, 0xF) => prefixed(wide(Op::St16(RegisterId::Y), high, [0, 5, 5, 6])),
        (0xC..=0xF, 0xE) => prefixed(wide(Op::Ld16(RegisterId::S), high, [3, 5, 5, 6])),
        (0xD..=0xF, 0xF) => prefixed(wide(Op::St16(RegisterId::S), high, [0, 5, 5, 6])),
        _ => ILLEGAL,
    }
}

const fn page2_entry(op: u8) -> DecodeEntry {
    let high = op >> 4;
    let low = op & 0x0F;

    match (high, low) {
        (0x3, 0xF) => entry(Op::Swi3, 2, AddressingMode::Inherent, 20),
        (0x8..=0xB, 0x3) => prefixed(wide(Op::Cmp16(RegisterId::U), high, [4, 6, 6, 7])),
        (0x8..=0xB, 0xC) => prefixed(wide(Op::Cmp16(RegisterId::S), high, [4, 6, 6, 7])),
        _ => ILLEGAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AddressingMode::*;

    /// (table index, length, mode, cycles) from the MC6809 data sheet.
    const REFERENCE: &[(usize, u8, AddressingMode, u8)] = &[
        (0x00, 2, Direct, 6),     // NEG <
        (0x0E, 2, Direct, 3),     // JMP <
        (0x12, 1, Inherent, 2),   // NOP
        (0x16, 3, Relative16, 5), // LBRA
        (0x17, 3, Relative16, 9), // LBSR
        (0x1E, 2, Immediate8, 8), // EXG
        (0x1F, 2, Immediate8, 6), // TFR
        (0x26, 2, Relative8, 3),  // BNE
        (0x30, 2, Indexed, 4),    // LEAX
        (0x34, 2, Immediate8, 5), // PSHS
        (0x3B, 1, Inherent, 6),   // RTI
        (0x3C, 2, Immediate8, 20), // CWAI
        (0x3D, 1, Inherent, 11),  // MUL
        (0x3F, 1, Inherent, 19),  // SWI
        (0x4F, 1, Inherent, 2),   // CLRA
        (0x6C, 2, Indexed, 6),    // INC ,X
        (0x7E, 3, Extended, 4),   // JMP >
        (0x83, 3, Immediate16, 4), // SUBD #
        (0x86, 2, Immediate8, 2), // LDA #
        (0x8D, 2, Relative8, 7),  // BSR
        (0x8E, 3, Immediate16, 3), // LDX #
        (0x97, 2, Direct, 4),     // STA <
        (0x9D, 2, Direct, 7),     // JSR <
        (0xAD, 2, Indexed, 7),    // JSR ,X
        (0xB7, 3, Extended, 5),   // STA >
        (0xBD, 3, Extended, 8),   // JSR >
        (0xC3, 3, Immediate16, 4), // ADDD #
        (0xCC, 3, Immediate16, 3), // LDD #
        (0xDD, 2, Direct, 5),     // STD <
        (0xEF, 2, Indexed, 5),    // STU ,X
        (0xFE, 3, Extended, 6),   // LDU >
        (0x121, 4, Relative16, 5), // LBRN
        (0x127, 4, Relative16, 5), // LBEQ
        (0x13F, 2, Inherent, 20), // SWI2
        (0x183, 4, Immediate16, 5), // CMPD #
        (0x18E, 4, Immediate16, 4), // LDY #
        (0x19F, 3, Direct, 6),    // STY <
        (0x1AC, 3, Indexed, 7),   // CMPY ,X
        (0x1CE, 4, Immediate16, 4), // LDS #
        (0x1FF, 4, Extended, 7),  // STS >
        (0x23F, 2, Inherent, 20), // SWI3
        (0x283, 4, Immediate16, 5), // CMPU #
        (0x2BC, 4, Extended, 8),  // CMPS >
    ];

    #[test]
    fn matches_data_sheet_sample() {
        for &(index, length, mode, cycles) in REFERENCE {
            let e = lookup(index);
            assert_ne!(e.op, Op::Illegal, "index {index:03X}");
            assert_eq!(e.length, length, "length of {index:03X}");
            assert_eq!(e.mode, mode, "mode of {index:03X}");
            assert_eq!(e.cycles, cycles, "cycles of {index:03X}");
        }
    }

    #[test]
    fn holes_decode_as_illegal() {
        for index in [0x01, 0x05, 0x15, 0x38, 0x3E, 0x41, 0x87, 0x8F, 0xC7, 0xCD, 0xCF, 0x120, 0x1FD, 0x300 - 1] {
            assert_eq!(*lookup(index), ILLEGAL, "index {index:03X}");
        }
    }

    #[test]
    fn escape_prefixes_select_pages() {
        assert_eq!(table_index(&[0x86, 0, 0, 0, 0]), 0x86);
        assert_eq!(table_index(&[0x10, 0x8E, 0, 0, 0]), 0x18E);
        assert_eq!(table_index(&[0x11, 0x83, 0, 0, 0]), 0x283);
        // The prefix slots themselves never hold an instruction.
        assert_eq!(*lookup(0x10), ILLEGAL);
        assert_eq!(*lookup(0x11), ILLEGAL);
        assert_eq!(*lookup(0x110), ILLEGAL);
        assert_eq!(*lookup(0x211), ILLEGAL);
    }

    #[test]
    fn named_ops_land_where_expected() {
        assert_eq!(lookup(0x8E).op, Op::Ld16(RegisterId::X));
        assert_eq!(lookup(0xDF).op, Op::St16(RegisterId::U));
        assert_eq!(lookup(0x10C).op, Op::Illegal);
        assert_eq!(lookup(0x2E).op, Op::Branch(Cond::Gt));
        assert_eq!(lookup(0x4A).op, Op::Unary(Unary::Dec, Target::A));
        assert_eq!(lookup(0xE6).op, Op::Alu(Alu::Ld, Target::B));
    }
}
