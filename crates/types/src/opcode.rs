use alloc::vec::Vec;
use core::fmt::{self, Display};

use crate::{Features, ValType};

/// One row of the opcode catalogue.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    /// Result type, or `None` if the instruction produces no value.
    pub result_type: Option<ValType>,
    /// Up to three operand types. `None` marks an unused slot or an operand
    /// whose type is polymorphic (e.g. the value operands of `select`).
    pub operand_types: [Option<ValType>; 3],
    /// Number of memory bytes touched, `0` for non-memory instructions.
    /// Determines the natural alignment of loads and stores.
    pub memory_size: u32,
    /// Prefix byte, `0` for single-byte opcodes.
    pub prefix: u8,
    /// Opcode byte; for prefixed opcodes the subcode, ULEB128-encoded on the
    /// wire.
    pub code: u32,
    /// Canonical text-format mnemonic.
    pub text: &'static str,
    /// Short decompiler mnemonic, if one exists.
    pub decomp: Option<&'static str>,
}

macro_rules! ty {
    (___) => {
        None
    };
    ($t:ident) => {
        Some(ValType::$t)
    };
}

macro_rules! decomp {
    () => {
        None
    };
    ($d:literal) => {
        Some($d)
    };
}

// The single source of truth for every instruction: result type, up to three
// operand types (`___` = none), touched memory bytes, prefix, code, text
// mnemonic and optional decompiler mnemonic. Rows are kept sorted by
// `(prefix, code)`; `from_code` binary-searches them.
macro_rules! opcodes {
    ($(
        $name:ident: ($rt:tt, $t1:tt, $t2:tt, $t3:tt, $mem:literal, $prefix:literal, $code:literal) => $text:literal $(/ $decomp:literal)?,
    )*) => {
        /// Every instruction in the catalogue, in `(prefix, code)` order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum Opcode {
            $($name,)*
        }

        static INFO: &[OpcodeInfo] = &[
            $(OpcodeInfo {
                result_type: ty!($rt),
                operand_types: [ty!($t1), ty!($t2), ty!($t3)],
                memory_size: $mem,
                prefix: $prefix,
                code: $code,
                text: $text,
                decomp: decomp!($($decomp)?),
            },)*
        ];

        static ALL: &[Opcode] = &[$(Opcode::$name,)*];

        impl Opcode {
            /// Look an opcode up by its canonical text mnemonic.
            /// Case-sensitive, exact. `None` means the mnemonic is unknown.
            pub fn from_name(text: &str) -> Option<Opcode> {
                match text {
                    $($text => Some(Opcode::$name),)*
                    _ => None,
                }
            }
        }
    };
}

#[rustfmt::skip]
opcodes! {
    // > Control instructions
    Unreachable: (___, ___, ___, ___, 0, 0, 0x00) => "unreachable",
    Nop: (___, ___, ___, ___, 0, 0, 0x01) => "nop",
    Block: (___, ___, ___, ___, 0, 0, 0x02) => "block",
    Loop: (___, ___, ___, ___, 0, 0, 0x03) => "loop",
    If: (___, I32, ___, ___, 0, 0, 0x04) => "if",
    Else: (___, ___, ___, ___, 0, 0, 0x05) => "else",
    Try: (___, ___, ___, ___, 0, 0, 0x06) => "try",
    Catch: (___, ___, ___, ___, 0, 0, 0x07) => "catch",
    Throw: (___, ___, ___, ___, 0, 0, 0x08) => "throw",
    Rethrow: (___, ___, ___, ___, 0, 0, 0x09) => "rethrow",
    BrOnExn: (___, ___, ___, ___, 0, 0, 0x0A) => "br_on_exn",
    End: (___, ___, ___, ___, 0, 0, 0x0B) => "end",
    Br: (___, ___, ___, ___, 0, 0, 0x0C) => "br",
    BrIf: (___, I32, ___, ___, 0, 0, 0x0D) => "br_if",
    BrTable: (___, I32, ___, ___, 0, 0, 0x0E) => "br_table",
    Return: (___, ___, ___, ___, 0, 0, 0x0F) => "return",
    Call: (___, ___, ___, ___, 0, 0, 0x10) => "call",
    CallIndirect: (___, I32, ___, ___, 0, 0, 0x11) => "call_indirect",
    ReturnCall: (___, ___, ___, ___, 0, 0, 0x12) => "return_call",
    ReturnCallIndirect: (___, I32, ___, ___, 0, 0, 0x13) => "return_call_indirect",

    // > Parametric instructions
    Drop: (___, ___, ___, ___, 0, 0, 0x1A) => "drop",
    Select: (___, ___, ___, I32, 0, 0, 0x1B) => "select",

    // > Variable instructions
    LocalGet: (___, ___, ___, ___, 0, 0, 0x20) => "local.get",
    LocalSet: (___, ___, ___, ___, 0, 0, 0x21) => "local.set",
    LocalTee: (___, ___, ___, ___, 0, 0, 0x22) => "local.tee",
    GlobalGet: (___, ___, ___, ___, 0, 0, 0x23) => "global.get",
    GlobalSet: (___, ___, ___, ___, 0, 0, 0x24) => "global.set",

    // > Table instructions
    TableGet: (___, I32, ___, ___, 0, 0, 0x25) => "table.get",
    TableSet: (___, I32, ___, ___, 0, 0, 0x26) => "table.set",

    // > Memory instructions
    I32Load: (I32, I32, ___, ___, 4, 0, 0x28) => "i32.load",
    I64Load: (I64, I32, ___, ___, 8, 0, 0x29) => "i64.load",
    F32Load: (F32, I32, ___, ___, 4, 0, 0x2A) => "f32.load",
    F64Load: (F64, I32, ___, ___, 8, 0, 0x2B) => "f64.load",
    I32Load8S: (I32, I32, ___, ___, 1, 0, 0x2C) => "i32.load8_s",
    I32Load8U: (I32, I32, ___, ___, 1, 0, 0x2D) => "i32.load8_u",
    I32Load16S: (I32, I32, ___, ___, 2, 0, 0x2E) => "i32.load16_s",
    I32Load16U: (I32, I32, ___, ___, 2, 0, 0x2F) => "i32.load16_u",
    I64Load8S: (I64, I32, ___, ___, 1, 0, 0x30) => "i64.load8_s",
    I64Load8U: (I64, I32, ___, ___, 1, 0, 0x31) => "i64.load8_u",
    I64Load16S: (I64, I32, ___, ___, 2, 0, 0x32) => "i64.load16_s",
    I64Load16U: (I64, I32, ___, ___, 2, 0, 0x33) => "i64.load16_u",
    I64Load32S: (I64, I32, ___, ___, 4, 0, 0x34) => "i64.load32_s",
    I64Load32U: (I64, I32, ___, ___, 4, 0, 0x35) => "i64.load32_u",
    I32Store: (___, I32, I32, ___, 4, 0, 0x36) => "i32.store",
    I64Store: (___, I32, I64, ___, 8, 0, 0x37) => "i64.store",
    F32Store: (___, I32, F32, ___, 4, 0, 0x38) => "f32.store",
    F64Store: (___, I32, F64, ___, 8, 0, 0x39) => "f64.store",
    I32Store8: (___, I32, I32, ___, 1, 0, 0x3A) => "i32.store8",
    I32Store16: (___, I32, I32, ___, 2, 0, 0x3B) => "i32.store16",
    I64Store8: (___, I32, I64, ___, 1, 0, 0x3C) => "i64.store8",
    I64Store16: (___, I32, I64, ___, 2, 0, 0x3D) => "i64.store16",
    I64Store32: (___, I32, I64, ___, 4, 0, 0x3E) => "i64.store32",
    MemorySize: (I32, ___, ___, ___, 0, 0, 0x3F) => "memory.size",
    MemoryGrow: (I32, I32, ___, ___, 0, 0, 0x40) => "memory.grow",

    // > Numeric instructions
    I32Const: (I32, ___, ___, ___, 0, 0, 0x41) => "i32.const",
    I64Const: (I64, ___, ___, ___, 0, 0, 0x42) => "i64.const",
    F32Const: (F32, ___, ___, ___, 0, 0, 0x43) => "f32.const",
    F64Const: (F64, ___, ___, ___, 0, 0, 0x44) => "f64.const",
    I32Eqz: (I32, I32, ___, ___, 0, 0, 0x45) => "i32.eqz" / "!",
    I32Eq: (I32, I32, I32, ___, 0, 0, 0x46) => "i32.eq" / "==",
    I32Ne: (I32, I32, I32, ___, 0, 0, 0x47) => "i32.ne" / "!=",
    I32LtS: (I32, I32, I32, ___, 0, 0, 0x48) => "i32.lt_s" / "<",
    I32LtU: (I32, I32, I32, ___, 0, 0, 0x49) => "i32.lt_u" / "<",
    I32GtS: (I32, I32, I32, ___, 0, 0, 0x4A) => "i32.gt_s" / ">",
    I32GtU: (I32, I32, I32, ___, 0, 0, 0x4B) => "i32.gt_u" / ">",
    I32LeS: (I32, I32, I32, ___, 0, 0, 0x4C) => "i32.le_s" / "<=",
    I32LeU: (I32, I32, I32, ___, 0, 0, 0x4D) => "i32.le_u" / "<=",
    I32GeS: (I32, I32, I32, ___, 0, 0, 0x4E) => "i32.ge_s" / ">=",
    I32GeU: (I32, I32, I32, ___, 0, 0, 0x4F) => "i32.ge_u" / ">=",
    I64Eqz: (I32, I64, ___, ___, 0, 0, 0x50) => "i64.eqz" / "!",
    I64Eq: (I32, I64, I64, ___, 0, 0, 0x51) => "i64.eq" / "==",
    I64Ne: (I32, I64, I64, ___, 0, 0, 0x52) => "i64.ne" / "!=",
    I64LtS: (I32, I64, I64, ___, 0, 0, 0x53) => "i64.lt_s" / "<",
    I64LtU: (I32, I64, I64, ___, 0, 0, 0x54) => "i64.lt_u" / "<",
    I64GtS: (I32, I64, I64, ___, 0, 0, 0x55) => "i64.gt_s" / ">",
    I64GtU: (I32, I64, I64, ___, 0, 0, 0x56) => "i64.gt_u" / ">",
    I64LeS: (I32, I64, I64, ___, 0, 0, 0x57) => "i64.le_s" / "<=",
    I64LeU: (I32, I64, I64, ___, 0, 0, 0x58) => "i64.le_u" / "<=",
    I64GeS: (I32, I64, I64, ___, 0, 0, 0x59) => "i64.ge_s" / ">=",
    I64GeU: (I32, I64, I64, ___, 0, 0, 0x5A) => "i64.ge_u" / ">=",
    F32Eq: (I32, F32, F32, ___, 0, 0, 0x5B) => "f32.eq" / "==",
    F32Ne: (I32, F32, F32, ___, 0, 0, 0x5C) => "f32.ne" / "!=",
    F32Lt: (I32, F32, F32, ___, 0, 0, 0x5D) => "f32.lt" / "<",
    F32Gt: (I32, F32, F32, ___, 0, 0, 0x5E) => "f32.gt" / ">",
    F32Le: (I32, F32, F32, ___, 0, 0, 0x5F) => "f32.le" / "<=",
    F32Ge: (I32, F32, F32, ___, 0, 0, 0x60) => "f32.ge" / ">=",
    F64Eq: (I32, F64, F64, ___, 0, 0, 0x61) => "f64.eq" / "==",
    F64Ne: (I32, F64, F64, ___, 0, 0, 0x62) => "f64.ne" / "!=",
    F64Lt: (I32, F64, F64, ___, 0, 0, 0x63) => "f64.lt" / "<",
    F64Gt: (I32, F64, F64, ___, 0, 0, 0x64) => "f64.gt" / ">",
    F64Le: (I32, F64, F64, ___, 0, 0, 0x65) => "f64.le" / "<=",
    F64Ge: (I32, F64, F64, ___, 0, 0, 0x66) => "f64.ge" / ">=",
    I32Clz: (I32, I32, ___, ___, 0, 0, 0x67) => "i32.clz" / "clz",
    I32Ctz: (I32, I32, ___, ___, 0, 0, 0x68) => "i32.ctz" / "ctz",
    I32Popcnt: (I32, I32, ___, ___, 0, 0, 0x69) => "i32.popcnt" / "popcnt",
    I32Add: (I32, I32, I32, ___, 0, 0, 0x6A) => "i32.add" / "+",
    I32Sub: (I32, I32, I32, ___, 0, 0, 0x6B) => "i32.sub" / "-",
    I32Mul: (I32, I32, I32, ___, 0, 0, 0x6C) => "i32.mul" / "*",
    I32DivS: (I32, I32, I32, ___, 0, 0, 0x6D) => "i32.div_s" / "/",
    I32DivU: (I32, I32, I32, ___, 0, 0, 0x6E) => "i32.div_u" / "/",
    I32RemS: (I32, I32, I32, ___, 0, 0, 0x6F) => "i32.rem_s" / "%",
    I32RemU: (I32, I32, I32, ___, 0, 0, 0x70) => "i32.rem_u" / "%",
    I32And: (I32, I32, I32, ___, 0, 0, 0x71) => "i32.and" / "&",
    I32Or: (I32, I32, I32, ___, 0, 0, 0x72) => "i32.or" / "|",
    I32Xor: (I32, I32, I32, ___, 0, 0, 0x73) => "i32.xor" / "^",
    I32Shl: (I32, I32, I32, ___, 0, 0, 0x74) => "i32.shl" / "<<",
    I32ShrS: (I32, I32, I32, ___, 0, 0, 0x75) => "i32.shr_s" / ">>",
    I32ShrU: (I32, I32, I32, ___, 0, 0, 0x76) => "i32.shr_u" / ">>",
    I32Rotl: (I32, I32, I32, ___, 0, 0, 0x77) => "i32.rotl" / "rotl",
    I32Rotr: (I32, I32, I32, ___, 0, 0, 0x78) => "i32.rotr" / "rotr",
    I64Clz: (I64, I64, ___, ___, 0, 0, 0x79) => "i64.clz" / "clz",
    I64Ctz: (I64, I64, ___, ___, 0, 0, 0x7A) => "i64.ctz" / "ctz",
    I64Popcnt: (I64, I64, ___, ___, 0, 0, 0x7B) => "i64.popcnt" / "popcnt",
    I64Add: (I64, I64, I64, ___, 0, 0, 0x7C) => "i64.add" / "+",
    I64Sub: (I64, I64, I64, ___, 0, 0, 0x7D) => "i64.sub" / "-",
    I64Mul: (I64, I64, I64, ___, 0, 0, 0x7E) => "i64.mul" / "*",
    I64DivS: (I64, I64, I64, ___, 0, 0, 0x7F) => "i64.div_s" / "/",
    I64DivU: (I64, I64, I64, ___, 0, 0, 0x80) => "i64.div_u" / "/",
    I64RemS: (I64, I64, I64, ___, 0, 0, 0x81) => "i64.rem_s" / "%",
    I64RemU: (I64, I64, I64, ___, 0, 0, 0x82) => "i64.rem_u" / "%",
    I64And: (I64, I64, I64, ___, 0, 0, 0x83) => "i64.and" / "&",
    I64Or: (I64, I64, I64, ___, 0, 0, 0x84) => "i64.or" / "|",
    I64Xor: (I64, I64, I64, ___, 0, 0, 0x85) => "i64.xor" / "^",
    I64Shl: (I64, I64, I64, ___, 0, 0, 0x86) => "i64.shl" / "<<",
    I64ShrS: (I64, I64, I64, ___, 0, 0, 0x87) => "i64.shr_s" / ">>",
    I64ShrU: (I64, I64, I64, ___, 0, 0, 0x88) => "i64.shr_u" / ">>",
    I64Rotl: (I64, I64, I64, ___, 0, 0, 0x89) => "i64.rotl" / "rotl",
    I64Rotr: (I64, I64, I64, ___, 0, 0, 0x8A) => "i64.rotr" / "rotr",
    F32Abs: (F32, F32, ___, ___, 0, 0, 0x8B) => "f32.abs" / "abs",
    F32Neg: (F32, F32, ___, ___, 0, 0, 0x8C) => "f32.neg" / "-",
    F32Ceil: (F32, F32, ___, ___, 0, 0, 0x8D) => "f32.ceil" / "ceil",
    F32Floor: (F32, F32, ___, ___, 0, 0, 0x8E) => "f32.floor" / "floor",
    F32Trunc: (F32, F32, ___, ___, 0, 0, 0x8F) => "f32.trunc" / "trunc",
    F32Nearest: (F32, F32, ___, ___, 0, 0, 0x90) => "f32.nearest" / "nearest",
    F32Sqrt: (F32, F32, ___, ___, 0, 0, 0x91) => "f32.sqrt" / "sqrt",
    F32Add: (F32, F32, F32, ___, 0, 0, 0x92) => "f32.add" / "+",
    F32Sub: (F32, F32, F32, ___, 0, 0, 0x93) => "f32.sub" / "-",
    F32Mul: (F32, F32, F32, ___, 0, 0, 0x94) => "f32.mul" / "*",
    F32Div: (F32, F32, F32, ___, 0, 0, 0x95) => "f32.div" / "/",
    F32Min: (F32, F32, F32, ___, 0, 0, 0x96) => "f32.min" / "min",
    F32Max: (F32, F32, F32, ___, 0, 0, 0x97) => "f32.max" / "max",
    F32Copysign: (F32, F32, F32, ___, 0, 0, 0x98) => "f32.copysign" / "copysign",
    F64Abs: (F64, F64, ___, ___, 0, 0, 0x99) => "f64.abs" / "abs",
    F64Neg: (F64, F64, ___, ___, 0, 0, 0x9A) => "f64.neg" / "-",
    F64Ceil: (F64, F64, ___, ___, 0, 0, 0x9B) => "f64.ceil" / "ceil",
    F64Floor: (F64, F64, ___, ___, 0, 0, 0x9C) => "f64.floor" / "floor",
    F64Trunc: (F64, F64, ___, ___, 0, 0, 0x9D) => "f64.trunc" / "trunc",
    F64Nearest: (F64, F64, ___, ___, 0, 0, 0x9E) => "f64.nearest" / "nearest",
    F64Sqrt: (F64, F64, ___, ___, 0, 0, 0x9F) => "f64.sqrt" / "sqrt",
    F64Add: (F64, F64, F64, ___, 0, 0, 0xA0) => "f64.add" / "+",
    F64Sub: (F64, F64, F64, ___, 0, 0, 0xA1) => "f64.sub" / "-",
    F64Mul: (F64, F64, F64, ___, 0, 0, 0xA2) => "f64.mul" / "*",
    F64Div: (F64, F64, F64, ___, 0, 0, 0xA3) => "f64.div" / "/",
    F64Min: (F64, F64, F64, ___, 0, 0, 0xA4) => "f64.min" / "min",
    F64Max: (F64, F64, F64, ___, 0, 0, 0xA5) => "f64.max" / "max",
    F64Copysign: (F64, F64, F64, ___, 0, 0, 0xA6) => "f64.copysign" / "copysign",
    I32WrapI64: (I32, I64, ___, ___, 0, 0, 0xA7) => "i32.wrap_i64",
    I32TruncF32S: (I32, F32, ___, ___, 0, 0, 0xA8) => "i32.trunc_f32_s",
    I32TruncF32U: (I32, F32, ___, ___, 0, 0, 0xA9) => "i32.trunc_f32_u",
    I32TruncF64S: (I32, F64, ___, ___, 0, 0, 0xAA) => "i32.trunc_f64_s",
    I32TruncF64U: (I32, F64, ___, ___, 0, 0, 0xAB) => "i32.trunc_f64_u",
    I64ExtendI32S: (I64, I32, ___, ___, 0, 0, 0xAC) => "i64.extend_i32_s",
    I64ExtendI32U: (I64, I32, ___, ___, 0, 0, 0xAD) => "i64.extend_i32_u",
    I64TruncF32S: (I64, F32, ___, ___, 0, 0, 0xAE) => "i64.trunc_f32_s",
    I64TruncF32U: (I64, F32, ___, ___, 0, 0, 0xAF) => "i64.trunc_f32_u",
    I64TruncF64S: (I64, F64, ___, ___, 0, 0, 0xB0) => "i64.trunc_f64_s",
    I64TruncF64U: (I64, F64, ___, ___, 0, 0, 0xB1) => "i64.trunc_f64_u",
    F32ConvertI32S: (F32, I32, ___, ___, 0, 0, 0xB2) => "f32.convert_i32_s",
    F32ConvertI32U: (F32, I32, ___, ___, 0, 0, 0xB3) => "f32.convert_i32_u",
    F32ConvertI64S: (F32, I64, ___, ___, 0, 0, 0xB4) => "f32.convert_i64_s",
    F32ConvertI64U: (F32, I64, ___, ___, 0, 0, 0xB5) => "f32.convert_i64_u",
    F32DemoteF64: (F32, F64, ___, ___, 0, 0, 0xB6) => "f32.demote_f64",
    F64ConvertI32S: (F64, I32, ___, ___, 0, 0, 0xB7) => "f64.convert_i32_s",
    F64ConvertI32U: (F64, I32, ___, ___, 0, 0, 0xB8) => "f64.convert_i32_u",
    F64ConvertI64S: (F64, I64, ___, ___, 0, 0, 0xB9) => "f64.convert_i64_s",
    F64ConvertI64U: (F64, I64, ___, ___, 0, 0, 0xBA) => "f64.convert_i64_u",
    F64PromoteF32: (F64, F32, ___, ___, 0, 0, 0xBB) => "f64.promote_f32",
    I32ReinterpretF32: (I32, F32, ___, ___, 0, 0, 0xBC) => "i32.reinterpret_f32",
    I64ReinterpretF64: (I64, F64, ___, ___, 0, 0, 0xBD) => "i64.reinterpret_f64",
    F32ReinterpretI32: (F32, I32, ___, ___, 0, 0, 0xBE) => "f32.reinterpret_i32",
    F64ReinterpretI64: (F64, I64, ___, ___, 0, 0, 0xBF) => "f64.reinterpret_i64",

    // > Sign-extension operators
    I32Extend8S: (I32, I32, ___, ___, 0, 0, 0xC0) => "i32.extend8_s",
    I32Extend16S: (I32, I32, ___, ___, 0, 0, 0xC1) => "i32.extend16_s",
    I64Extend8S: (I64, I64, ___, ___, 0, 0, 0xC2) => "i64.extend8_s",
    I64Extend16S: (I64, I64, ___, ___, 0, 0, 0xC3) => "i64.extend16_s",
    I64Extend32S: (I64, I64, ___, ___, 0, 0, 0xC4) => "i64.extend32_s",

    // > Reference types
    RefNull: (AnyRef, ___, ___, ___, 0, 0, 0xD0) => "ref.null",
    RefIsNull: (I32, AnyRef, ___, ___, 0, 0, 0xD1) => "ref.is_null",
    RefFunc: (FuncRef, ___, ___, ___, 0, 0, 0xD2) => "ref.func",

    // > Interpreter-only instructions. Private bytecode, never valid in a
    // > serialised module.
    InterpAlloca: (___, ___, ___, ___, 0, 0, 0xE0) => "alloca",
    InterpBrUnless: (___, I32, ___, ___, 0, 0, 0xE1) => "br_unless",
    InterpCallHost: (___, ___, ___, ___, 0, 0, 0xE2) => "call_host",
    InterpData: (___, ___, ___, ___, 0, 0, 0xE3) => "data",
    InterpDropKeep: (___, ___, ___, ___, 0, 0, 0xE4) => "drop_keep",

    // > Non-trapping float-to-int conversions
    I32TruncSatF32S: (I32, F32, ___, ___, 0, 0xFC, 0x00) => "i32.trunc_sat_f32_s",
    I32TruncSatF32U: (I32, F32, ___, ___, 0, 0xFC, 0x01) => "i32.trunc_sat_f32_u",
    I32TruncSatF64S: (I32, F64, ___, ___, 0, 0xFC, 0x02) => "i32.trunc_sat_f64_s",
    I32TruncSatF64U: (I32, F64, ___, ___, 0, 0xFC, 0x03) => "i32.trunc_sat_f64_u",
    I64TruncSatF32S: (I64, F32, ___, ___, 0, 0xFC, 0x04) => "i64.trunc_sat_f32_s",
    I64TruncSatF32U: (I64, F32, ___, ___, 0, 0xFC, 0x05) => "i64.trunc_sat_f32_u",
    I64TruncSatF64S: (I64, F64, ___, ___, 0, 0xFC, 0x06) => "i64.trunc_sat_f64_s",
    I64TruncSatF64U: (I64, F64, ___, ___, 0, 0xFC, 0x07) => "i64.trunc_sat_f64_u",

    // > Bulk memory operations
    MemoryInit: (___, I32, I32, I32, 0, 0xFC, 0x08) => "memory.init",
    DataDrop: (___, ___, ___, ___, 0, 0xFC, 0x09) => "data.drop",
    MemoryCopy: (___, I32, I32, I32, 0, 0xFC, 0x0A) => "memory.copy",
    MemoryFill: (___, I32, I32, I32, 0, 0xFC, 0x0B) => "memory.fill",
    TableInit: (___, I32, I32, I32, 0, 0xFC, 0x0C) => "table.init",
    ElemDrop: (___, ___, ___, ___, 0, 0xFC, 0x0D) => "elem.drop",
    TableCopy: (___, I32, I32, I32, 0, 0xFC, 0x0E) => "table.copy",
    TableGrow: (I32, ___, I32, ___, 0, 0xFC, 0x0F) => "table.grow",
    TableSize: (I32, ___, ___, ___, 0, 0xFC, 0x10) => "table.size",
    TableFill: (___, I32, ___, I32, 0, 0xFC, 0x11) => "table.fill",

    // > SIMD memory instructions
    V128Load: (V128, I32, ___, ___, 16, 0xFD, 0x00) => "v128.load",
    V128Load8x8S: (V128, I32, ___, ___, 8, 0xFD, 0x01) => "v128.load8x8_s",
    V128Load8x8U: (V128, I32, ___, ___, 8, 0xFD, 0x02) => "v128.load8x8_u",
    V128Load16x4S: (V128, I32, ___, ___, 8, 0xFD, 0x03) => "v128.load16x4_s",
    V128Load16x4U: (V128, I32, ___, ___, 8, 0xFD, 0x04) => "v128.load16x4_u",
    V128Load32x2S: (V128, I32, ___, ___, 8, 0xFD, 0x05) => "v128.load32x2_s",
    V128Load32x2U: (V128, I32, ___, ___, 8, 0xFD, 0x06) => "v128.load32x2_u",
    V128Load8Splat: (V128, I32, ___, ___, 1, 0xFD, 0x07) => "v128.load8_splat",
    V128Load16Splat: (V128, I32, ___, ___, 2, 0xFD, 0x08) => "v128.load16_splat",
    V128Load32Splat: (V128, I32, ___, ___, 4, 0xFD, 0x09) => "v128.load32_splat",
    V128Load64Splat: (V128, I32, ___, ___, 8, 0xFD, 0x0A) => "v128.load64_splat",
    V128Store: (___, I32, V128, ___, 16, 0xFD, 0x0B) => "v128.store",

    // > SIMD constants, shuffles and splats
    V128Const: (V128, ___, ___, ___, 0, 0xFD, 0x0C) => "v128.const",
    I8x16Shuffle: (V128, V128, V128, ___, 0, 0xFD, 0x0D) => "i8x16.shuffle",
    I8x16Swizzle: (V128, V128, V128, ___, 0, 0xFD, 0x0E) => "i8x16.swizzle",
    I8x16Splat: (V128, I32, ___, ___, 0, 0xFD, 0x0F) => "i8x16.splat",
    I16x8Splat: (V128, I32, ___, ___, 0, 0xFD, 0x10) => "i16x8.splat",
    I32x4Splat: (V128, I32, ___, ___, 0, 0xFD, 0x11) => "i32x4.splat",
    I64x2Splat: (V128, I64, ___, ___, 0, 0xFD, 0x12) => "i64x2.splat",
    F32x4Splat: (V128, F32, ___, ___, 0, 0xFD, 0x13) => "f32x4.splat",
    F64x2Splat: (V128, F64, ___, ___, 0, 0xFD, 0x14) => "f64x2.splat",

    // > SIMD lane accessors
    I8x16ExtractLaneS: (I32, V128, ___, ___, 0, 0xFD, 0x15) => "i8x16.extract_lane_s",
    I8x16ExtractLaneU: (I32, V128, ___, ___, 0, 0xFD, 0x16) => "i8x16.extract_lane_u",
    I8x16ReplaceLane: (V128, V128, I32, ___, 0, 0xFD, 0x17) => "i8x16.replace_lane",
    I16x8ExtractLaneS: (I32, V128, ___, ___, 0, 0xFD, 0x18) => "i16x8.extract_lane_s",
    I16x8ExtractLaneU: (I32, V128, ___, ___, 0, 0xFD, 0x19) => "i16x8.extract_lane_u",
    I16x8ReplaceLane: (V128, V128, I32, ___, 0, 0xFD, 0x1A) => "i16x8.replace_lane",
    I32x4ExtractLane: (I32, V128, ___, ___, 0, 0xFD, 0x1B) => "i32x4.extract_lane",
    I32x4ReplaceLane: (V128, V128, I32, ___, 0, 0xFD, 0x1C) => "i32x4.replace_lane",
    I64x2ExtractLane: (I64, V128, ___, ___, 0, 0xFD, 0x1D) => "i64x2.extract_lane",
    I64x2ReplaceLane: (V128, V128, I64, ___, 0, 0xFD, 0x1E) => "i64x2.replace_lane",
    F32x4ExtractLane: (F32, V128, ___, ___, 0, 0xFD, 0x1F) => "f32x4.extract_lane",
    F32x4ReplaceLane: (V128, V128, F32, ___, 0, 0xFD, 0x20) => "f32x4.replace_lane",
    F64x2ExtractLane: (F64, V128, ___, ___, 0, 0xFD, 0x21) => "f64x2.extract_lane",
    F64x2ReplaceLane: (V128, V128, F64, ___, 0, 0xFD, 0x22) => "f64x2.replace_lane",

    // > SIMD comparisons
    I8x16Eq: (V128, V128, V128, ___, 0, 0xFD, 0x23) => "i8x16.eq" / "==",
    I8x16Ne: (V128, V128, V128, ___, 0, 0xFD, 0x24) => "i8x16.ne" / "!=",
    I8x16LtS: (V128, V128, V128, ___, 0, 0xFD, 0x25) => "i8x16.lt_s" / "<",
    I8x16LtU: (V128, V128, V128, ___, 0, 0xFD, 0x26) => "i8x16.lt_u" / "<",
    I8x16GtS: (V128, V128, V128, ___, 0, 0xFD, 0x27) => "i8x16.gt_s" / ">",
    I8x16GtU: (V128, V128, V128, ___, 0, 0xFD, 0x28) => "i8x16.gt_u" / ">",
    I8x16LeS: (V128, V128, V128, ___, 0, 0xFD, 0x29) => "i8x16.le_s" / "<=",
    I8x16LeU: (V128, V128, V128, ___, 0, 0xFD, 0x2A) => "i8x16.le_u" / "<=",
    I8x16GeS: (V128, V128, V128, ___, 0, 0xFD, 0x2B) => "i8x16.ge_s" / ">=",
    I8x16GeU: (V128, V128, V128, ___, 0, 0xFD, 0x2C) => "i8x16.ge_u" / ">=",
    I16x8Eq: (V128, V128, V128, ___, 0, 0xFD, 0x2D) => "i16x8.eq" / "==",
    I16x8Ne: (V128, V128, V128, ___, 0, 0xFD, 0x2E) => "i16x8.ne" / "!=",
    I16x8LtS: (V128, V128, V128, ___, 0, 0xFD, 0x2F) => "i16x8.lt_s" / "<",
    I16x8LtU: (V128, V128, V128, ___, 0, 0xFD, 0x30) => "i16x8.lt_u" / "<",
    I16x8GtS: (V128, V128, V128, ___, 0, 0xFD, 0x31) => "i16x8.gt_s" / ">",
    I16x8GtU: (V128, V128, V128, ___, 0, 0xFD, 0x32) => "i16x8.gt_u" / ">",
    I16x8LeS: (V128, V128, V128, ___, 0, 0xFD, 0x33) => "i16x8.le_s" / "<=",
    I16x8LeU: (V128, V128, V128, ___, 0, 0xFD, 0x34) => "i16x8.le_u" / "<=",
    I16x8GeS: (V128, V128, V128, ___, 0, 0xFD, 0x35) => "i16x8.ge_s" / ">=",
    I16x8GeU: (V128, V128, V128, ___, 0, 0xFD, 0x36) => "i16x8.ge_u" / ">=",
    I32x4Eq: (V128, V128, V128, ___, 0, 0xFD, 0x37) => "i32x4.eq" / "==",
    I32x4Ne: (V128, V128, V128, ___, 0, 0xFD, 0x38) => "i32x4.ne" / "!=",
    I32x4LtS: (V128, V128, V128, ___, 0, 0xFD, 0x39) => "i32x4.lt_s" / "<",
    I32x4LtU: (V128, V128, V128, ___, 0, 0xFD, 0x3A) => "i32x4.lt_u" / "<",
    I32x4GtS: (V128, V128, V128, ___, 0, 0xFD, 0x3B) => "i32x4.gt_s" / ">",
    I32x4GtU: (V128, V128, V128, ___, 0, 0xFD, 0x3C) => "i32x4.gt_u" / ">",
    I32x4LeS: (V128, V128, V128, ___, 0, 0xFD, 0x3D) => "i32x4.le_s" / "<=",
    I32x4LeU: (V128, V128, V128, ___, 0, 0xFD, 0x3E) => "i32x4.le_u" / "<=",
    I32x4GeS: (V128, V128, V128, ___, 0, 0xFD, 0x3F) => "i32x4.ge_s" / ">=",
    I32x4GeU: (V128, V128, V128, ___, 0, 0xFD, 0x40) => "i32x4.ge_u" / ">=",
    F32x4Eq: (V128, V128, V128, ___, 0, 0xFD, 0x41) => "f32x4.eq" / "==",
    F32x4Ne: (V128, V128, V128, ___, 0, 0xFD, 0x42) => "f32x4.ne" / "!=",
    F32x4Lt: (V128, V128, V128, ___, 0, 0xFD, 0x43) => "f32x4.lt" / "<",
    F32x4Gt: (V128, V128, V128, ___, 0, 0xFD, 0x44) => "f32x4.gt" / ">",
    F32x4Le: (V128, V128, V128, ___, 0, 0xFD, 0x45) => "f32x4.le" / "<=",
    F32x4Ge: (V128, V128, V128, ___, 0, 0xFD, 0x46) => "f32x4.ge" / ">=",
    F64x2Eq: (V128, V128, V128, ___, 0, 0xFD, 0x47) => "f64x2.eq" / "==",
    F64x2Ne: (V128, V128, V128, ___, 0, 0xFD, 0x48) => "f64x2.ne" / "!=",
    F64x2Lt: (V128, V128, V128, ___, 0, 0xFD, 0x49) => "f64x2.lt" / "<",
    F64x2Gt: (V128, V128, V128, ___, 0, 0xFD, 0x4A) => "f64x2.gt" / ">",
    F64x2Le: (V128, V128, V128, ___, 0, 0xFD, 0x4B) => "f64x2.le" / "<=",
    F64x2Ge: (V128, V128, V128, ___, 0, 0xFD, 0x4C) => "f64x2.ge" / ">=",

    // > SIMD bitwise operations
    V128Not: (V128, V128, ___, ___, 0, 0xFD, 0x4D) => "v128.not",
    V128And: (V128, V128, V128, ___, 0, 0xFD, 0x4E) => "v128.and",
    V128Andnot: (V128, V128, V128, ___, 0, 0xFD, 0x4F) => "v128.andnot",
    V128Or: (V128, V128, V128, ___, 0, 0xFD, 0x50) => "v128.or",
    V128Xor: (V128, V128, V128, ___, 0, 0xFD, 0x51) => "v128.xor",
    V128Bitselect: (V128, V128, V128, V128, 0, 0xFD, 0x52) => "v128.bitselect",
    V128AnyTrue: (I32, V128, ___, ___, 0, 0xFD, 0x53) => "v128.any_true",

    F32x4DemoteF64x2Zero: (V128, V128, ___, ___, 0, 0xFD, 0x5E) => "f32x4.demote_f64x2_zero",
    F64x2PromoteLowF32x4: (V128, V128, ___, ___, 0, 0xFD, 0x5F) => "f64x2.promote_low_f32x4",

    // > SIMD i8x16 operations
    I8x16Abs: (V128, V128, ___, ___, 0, 0xFD, 0x60) => "i8x16.abs",
    I8x16Neg: (V128, V128, ___, ___, 0, 0xFD, 0x61) => "i8x16.neg",
    I8x16Popcnt: (V128, V128, ___, ___, 0, 0xFD, 0x62) => "i8x16.popcnt",
    I8x16AllTrue: (I32, V128, ___, ___, 0, 0xFD, 0x63) => "i8x16.all_true",
    I8x16Bitmask: (I32, V128, ___, ___, 0, 0xFD, 0x64) => "i8x16.bitmask",
    I8x16NarrowI16x8S: (V128, V128, V128, ___, 0, 0xFD, 0x65) => "i8x16.narrow_i16x8_s",
    I8x16NarrowI16x8U: (V128, V128, V128, ___, 0, 0xFD, 0x66) => "i8x16.narrow_i16x8_u",
    F32x4Ceil: (V128, V128, ___, ___, 0, 0xFD, 0x67) => "f32x4.ceil",
    F32x4Floor: (V128, V128, ___, ___, 0, 0xFD, 0x68) => "f32x4.floor",
    F32x4Trunc: (V128, V128, ___, ___, 0, 0xFD, 0x69) => "f32x4.trunc",
    F32x4Nearest: (V128, V128, ___, ___, 0, 0xFD, 0x6A) => "f32x4.nearest",
    I8x16Shl: (V128, V128, I32, ___, 0, 0xFD, 0x6B) => "i8x16.shl",
    I8x16ShrS: (V128, V128, I32, ___, 0, 0xFD, 0x6C) => "i8x16.shr_s",
    I8x16ShrU: (V128, V128, I32, ___, 0, 0xFD, 0x6D) => "i8x16.shr_u",
    I8x16Add: (V128, V128, V128, ___, 0, 0xFD, 0x6E) => "i8x16.add",
    I8x16AddSatS: (V128, V128, V128, ___, 0, 0xFD, 0x6F) => "i8x16.add_sat_s",
    I8x16AddSatU: (V128, V128, V128, ___, 0, 0xFD, 0x70) => "i8x16.add_sat_u",
    I8x16Sub: (V128, V128, V128, ___, 0, 0xFD, 0x71) => "i8x16.sub",
    I8x16SubSatS: (V128, V128, V128, ___, 0, 0xFD, 0x72) => "i8x16.sub_sat_s",
    I8x16SubSatU: (V128, V128, V128, ___, 0, 0xFD, 0x73) => "i8x16.sub_sat_u",
    F64x2Ceil: (V128, V128, ___, ___, 0, 0xFD, 0x74) => "f64x2.ceil",
    F64x2Floor: (V128, V128, ___, ___, 0, 0xFD, 0x75) => "f64x2.floor",
    I8x16MinS: (V128, V128, V128, ___, 0, 0xFD, 0x76) => "i8x16.min_s",
    I8x16MinU: (V128, V128, V128, ___, 0, 0xFD, 0x77) => "i8x16.min_u",
    I8x16MaxS: (V128, V128, V128, ___, 0, 0xFD, 0x78) => "i8x16.max_s",
    I8x16MaxU: (V128, V128, V128, ___, 0, 0xFD, 0x79) => "i8x16.max_u",
    F64x2Trunc: (V128, V128, ___, ___, 0, 0xFD, 0x7A) => "f64x2.trunc",
    I8x16AvgrU: (V128, V128, V128, ___, 0, 0xFD, 0x7B) => "i8x16.avgr_u",
    I16x8ExtaddPairwiseI8x16S: (V128, V128, ___, ___, 0, 0xFD, 0x7C) => "i16x8.extadd_pairwise_i8x16_s",
    I16x8ExtaddPairwiseI8x16U: (V128, V128, ___, ___, 0, 0xFD, 0x7D) => "i16x8.extadd_pairwise_i8x16_u",
    I32x4ExtaddPairwiseI16x8S: (V128, V128, ___, ___, 0, 0xFD, 0x7E) => "i32x4.extadd_pairwise_i16x8_s",
    I32x4ExtaddPairwiseI16x8U: (V128, V128, ___, ___, 0, 0xFD, 0x7F) => "i32x4.extadd_pairwise_i16x8_u",

    // > SIMD i16x8 operations
    I16x8Abs: (V128, V128, ___, ___, 0, 0xFD, 0x80) => "i16x8.abs",
    I16x8Neg: (V128, V128, ___, ___, 0, 0xFD, 0x81) => "i16x8.neg",
    I16x8Q15mulrSatS: (V128, V128, V128, ___, 0, 0xFD, 0x82) => "i16x8.q15mulr_sat_s",
    I16x8AllTrue: (I32, V128, ___, ___, 0, 0xFD, 0x83) => "i16x8.all_true",
    I16x8Bitmask: (I32, V128, ___, ___, 0, 0xFD, 0x84) => "i16x8.bitmask",
    I16x8NarrowI32x4S: (V128, V128, V128, ___, 0, 0xFD, 0x85) => "i16x8.narrow_i32x4_s",
    I16x8NarrowI32x4U: (V128, V128, V128, ___, 0, 0xFD, 0x86) => "i16x8.narrow_i32x4_u",
    I16x8ExtendLowI8x16S: (V128, V128, ___, ___, 0, 0xFD, 0x87) => "i16x8.extend_low_i8x16_s",
    I16x8ExtendHighI8x16S: (V128, V128, ___, ___, 0, 0xFD, 0x88) => "i16x8.extend_high_i8x16_s",
    I16x8ExtendLowI8x16U: (V128, V128, ___, ___, 0, 0xFD, 0x89) => "i16x8.extend_low_i8x16_u",
    I16x8ExtendHighI8x16U: (V128, V128, ___, ___, 0, 0xFD, 0x8A) => "i16x8.extend_high_i8x16_u",
    I16x8Shl: (V128, V128, I32, ___, 0, 0xFD, 0x8B) => "i16x8.shl",
    I16x8ShrS: (V128, V128, I32, ___, 0, 0xFD, 0x8C) => "i16x8.shr_s",
    I16x8ShrU: (V128, V128, I32, ___, 0, 0xFD, 0x8D) => "i16x8.shr_u",
    I16x8Add: (V128, V128, V128, ___, 0, 0xFD, 0x8E) => "i16x8.add",
    I16x8AddSatS: (V128, V128, V128, ___, 0, 0xFD, 0x8F) => "i16x8.add_sat_s",
    I16x8AddSatU: (V128, V128, V128, ___, 0, 0xFD, 0x90) => "i16x8.add_sat_u",
    I16x8Sub: (V128, V128, V128, ___, 0, 0xFD, 0x91) => "i16x8.sub",
    I16x8SubSatS: (V128, V128, V128, ___, 0, 0xFD, 0x92) => "i16x8.sub_sat_s",
    I16x8SubSatU: (V128, V128, V128, ___, 0, 0xFD, 0x93) => "i16x8.sub_sat_u",
    F64x2Nearest: (V128, V128, ___, ___, 0, 0xFD, 0x94) => "f64x2.nearest",
    I16x8Mul: (V128, V128, V128, ___, 0, 0xFD, 0x95) => "i16x8.mul",
    I16x8MinS: (V128, V128, V128, ___, 0, 0xFD, 0x96) => "i16x8.min_s",
    I16x8MinU: (V128, V128, V128, ___, 0, 0xFD, 0x97) => "i16x8.min_u",
    I16x8MaxS: (V128, V128, V128, ___, 0, 0xFD, 0x98) => "i16x8.max_s",
    I16x8MaxU: (V128, V128, V128, ___, 0, 0xFD, 0x99) => "i16x8.max_u",
    I16x8AvgrU: (V128, V128, V128, ___, 0, 0xFD, 0x9B) => "i16x8.avgr_u",
    I16x8ExtmulLowI8x16S: (V128, V128, V128, ___, 0, 0xFD, 0x9C) => "i16x8.extmul_low_i8x16_s",
    I16x8ExtmulHighI8x16S: (V128, V128, V128, ___, 0, 0xFD, 0x9D) => "i16x8.extmul_high_i8x16_s",
    I16x8ExtmulLowI8x16U: (V128, V128, V128, ___, 0, 0xFD, 0x9E) => "i16x8.extmul_low_i8x16_u",
    I16x8ExtmulHighI8x16U: (V128, V128, V128, ___, 0, 0xFD, 0x9F) => "i16x8.extmul_high_i8x16_u",

    // > SIMD i32x4 operations
    I32x4Abs: (V128, V128, ___, ___, 0, 0xFD, 0xA0) => "i32x4.abs",
    I32x4Neg: (V128, V128, ___, ___, 0, 0xFD, 0xA1) => "i32x4.neg",
    I32x4AllTrue: (I32, V128, ___, ___, 0, 0xFD, 0xA3) => "i32x4.all_true",
    I32x4Bitmask: (I32, V128, ___, ___, 0, 0xFD, 0xA4) => "i32x4.bitmask",
    I32x4ExtendLowI16x8S: (V128, V128, ___, ___, 0, 0xFD, 0xA7) => "i32x4.extend_low_i16x8_s",
    I32x4ExtendHighI16x8S: (V128, V128, ___, ___, 0, 0xFD, 0xA8) => "i32x4.extend_high_i16x8_s",
    I32x4ExtendLowI16x8U: (V128, V128, ___, ___, 0, 0xFD, 0xA9) => "i32x4.extend_low_i16x8_u",
    I32x4ExtendHighI16x8U: (V128, V128, ___, ___, 0, 0xFD, 0xAA) => "i32x4.extend_high_i16x8_u",
    I32x4Shl: (V128, V128, I32, ___, 0, 0xFD, 0xAB) => "i32x4.shl",
    I32x4ShrS: (V128, V128, I32, ___, 0, 0xFD, 0xAC) => "i32x4.shr_s",
    I32x4ShrU: (V128, V128, I32, ___, 0, 0xFD, 0xAD) => "i32x4.shr_u",
    I32x4Add: (V128, V128, V128, ___, 0, 0xFD, 0xAE) => "i32x4.add",
    I32x4Sub: (V128, V128, V128, ___, 0, 0xFD, 0xB1) => "i32x4.sub",
    I32x4Mul: (V128, V128, V128, ___, 0, 0xFD, 0xB5) => "i32x4.mul",
    I32x4MinS: (V128, V128, V128, ___, 0, 0xFD, 0xB6) => "i32x4.min_s",
    I32x4MinU: (V128, V128, V128, ___, 0, 0xFD, 0xB7) => "i32x4.min_u",
    I32x4MaxS: (V128, V128, V128, ___, 0, 0xFD, 0xB8) => "i32x4.max_s",
    I32x4MaxU: (V128, V128, V128, ___, 0, 0xFD, 0xB9) => "i32x4.max_u",
    I32x4DotI16x8S: (V128, V128, V128, ___, 0, 0xFD, 0xBA) => "i32x4.dot_i16x8_s",
    I32x4ExtmulLowI16x8S: (V128, V128, V128, ___, 0, 0xFD, 0xBC) => "i32x4.extmul_low_i16x8_s",
    I32x4ExtmulHighI16x8S: (V128, V128, V128, ___, 0, 0xFD, 0xBD) => "i32x4.extmul_high_i16x8_s",
    I32x4ExtmulLowI16x8U: (V128, V128, V128, ___, 0, 0xFD, 0xBE) => "i32x4.extmul_low_i16x8_u",
    I32x4ExtmulHighI16x8U: (V128, V128, V128, ___, 0, 0xFD, 0xBF) => "i32x4.extmul_high_i16x8_u",

    // > SIMD i64x2 operations
    I64x2Abs: (V128, V128, ___, ___, 0, 0xFD, 0xC0) => "i64x2.abs",
    I64x2Neg: (V128, V128, ___, ___, 0, 0xFD, 0xC1) => "i64x2.neg",
    I64x2AllTrue: (I32, V128, ___, ___, 0, 0xFD, 0xC3) => "i64x2.all_true",
    I64x2Bitmask: (I32, V128, ___, ___, 0, 0xFD, 0xC4) => "i64x2.bitmask",
    I64x2ExtendLowI32x4S: (V128, V128, ___, ___, 0, 0xFD, 0xC7) => "i64x2.extend_low_i32x4_s",
    I64x2ExtendHighI32x4S: (V128, V128, ___, ___, 0, 0xFD, 0xC8) => "i64x2.extend_high_i32x4_s",
    I64x2ExtendLowI32x4U: (V128, V128, ___, ___, 0, 0xFD, 0xC9) => "i64x2.extend_low_i32x4_u",
    I64x2ExtendHighI32x4U: (V128, V128, ___, ___, 0, 0xFD, 0xCA) => "i64x2.extend_high_i32x4_u",
    I64x2Shl: (V128, V128, I32, ___, 0, 0xFD, 0xCB) => "i64x2.shl",
    I64x2ShrS: (V128, V128, I32, ___, 0, 0xFD, 0xCC) => "i64x2.shr_s",
    I64x2ShrU: (V128, V128, I32, ___, 0, 0xFD, 0xCD) => "i64x2.shr_u",
    I64x2Add: (V128, V128, V128, ___, 0, 0xFD, 0xCE) => "i64x2.add",
    I64x2Sub: (V128, V128, V128, ___, 0, 0xFD, 0xD1) => "i64x2.sub",
    I64x2Mul: (V128, V128, V128, ___, 0, 0xFD, 0xD5) => "i64x2.mul",
    I64x2Eq: (V128, V128, V128, ___, 0, 0xFD, 0xD6) => "i64x2.eq" / "==",
    I64x2Ne: (V128, V128, V128, ___, 0, 0xFD, 0xD7) => "i64x2.ne" / "!=",
    I64x2LtS: (V128, V128, V128, ___, 0, 0xFD, 0xD8) => "i64x2.lt_s" / "<",
    I64x2GtS: (V128, V128, V128, ___, 0, 0xFD, 0xD9) => "i64x2.gt_s" / ">",
    I64x2LeS: (V128, V128, V128, ___, 0, 0xFD, 0xDA) => "i64x2.le_s" / "<=",
    I64x2GeS: (V128, V128, V128, ___, 0, 0xFD, 0xDB) => "i64x2.ge_s" / ">=",
    I64x2ExtmulLowI32x4S: (V128, V128, V128, ___, 0, 0xFD, 0xDC) => "i64x2.extmul_low_i32x4_s",
    I64x2ExtmulHighI32x4S: (V128, V128, V128, ___, 0, 0xFD, 0xDD) => "i64x2.extmul_high_i32x4_s",
    I64x2ExtmulLowI32x4U: (V128, V128, V128, ___, 0, 0xFD, 0xDE) => "i64x2.extmul_low_i32x4_u",
    I64x2ExtmulHighI32x4U: (V128, V128, V128, ___, 0, 0xFD, 0xDF) => "i64x2.extmul_high_i32x4_u",

    // > SIMD f32x4 / f64x2 arithmetic
    F32x4Abs: (V128, V128, ___, ___, 0, 0xFD, 0xE0) => "f32x4.abs",
    F32x4Neg: (V128, V128, ___, ___, 0, 0xFD, 0xE1) => "f32x4.neg",
    F32x4Sqrt: (V128, V128, ___, ___, 0, 0xFD, 0xE3) => "f32x4.sqrt",
    F32x4Add: (V128, V128, V128, ___, 0, 0xFD, 0xE4) => "f32x4.add" / "+",
    F32x4Sub: (V128, V128, V128, ___, 0, 0xFD, 0xE5) => "f32x4.sub" / "-",
    F32x4Mul: (V128, V128, V128, ___, 0, 0xFD, 0xE6) => "f32x4.mul" / "*",
    F32x4Div: (V128, V128, V128, ___, 0, 0xFD, 0xE7) => "f32x4.div" / "/",
    F32x4Min: (V128, V128, V128, ___, 0, 0xFD, 0xE8) => "f32x4.min",
    F32x4Max: (V128, V128, V128, ___, 0, 0xFD, 0xE9) => "f32x4.max",
    F32x4Pmin: (V128, V128, V128, ___, 0, 0xFD, 0xEA) => "f32x4.pmin",
    F32x4Pmax: (V128, V128, V128, ___, 0, 0xFD, 0xEB) => "f32x4.pmax",
    F64x2Abs: (V128, V128, ___, ___, 0, 0xFD, 0xEC) => "f64x2.abs",
    F64x2Neg: (V128, V128, ___, ___, 0, 0xFD, 0xED) => "f64x2.neg",
    F64x2Sqrt: (V128, V128, ___, ___, 0, 0xFD, 0xEF) => "f64x2.sqrt",
    F64x2Add: (V128, V128, V128, ___, 0, 0xFD, 0xF0) => "f64x2.add" / "+",
    F64x2Sub: (V128, V128, V128, ___, 0, 0xFD, 0xF1) => "f64x2.sub" / "-",
    F64x2Mul: (V128, V128, V128, ___, 0, 0xFD, 0xF2) => "f64x2.mul" / "*",
    F64x2Div: (V128, V128, V128, ___, 0, 0xFD, 0xF3) => "f64x2.div" / "/",
    F64x2Min: (V128, V128, V128, ___, 0, 0xFD, 0xF4) => "f64x2.min",
    F64x2Max: (V128, V128, V128, ___, 0, 0xFD, 0xF5) => "f64x2.max",
    F64x2Pmin: (V128, V128, V128, ___, 0, 0xFD, 0xF6) => "f64x2.pmin",
    F64x2Pmax: (V128, V128, V128, ___, 0, 0xFD, 0xF7) => "f64x2.pmax",

    // > SIMD conversions
    I32x4TruncSatF32x4S: (V128, V128, ___, ___, 0, 0xFD, 0xF8) => "i32x4.trunc_sat_f32x4_s",
    I32x4TruncSatF32x4U: (V128, V128, ___, ___, 0, 0xFD, 0xF9) => "i32x4.trunc_sat_f32x4_u",
    F32x4ConvertI32x4S: (V128, V128, ___, ___, 0, 0xFD, 0xFA) => "f32x4.convert_i32x4_s",
    F32x4ConvertI32x4U: (V128, V128, ___, ___, 0, 0xFD, 0xFB) => "f32x4.convert_i32x4_u",
    I32x4TruncSatF64x2SZero: (V128, V128, ___, ___, 0, 0xFD, 0xFC) => "i32x4.trunc_sat_f64x2_s_zero",
    I32x4TruncSatF64x2UZero: (V128, V128, ___, ___, 0, 0xFD, 0xFD) => "i32x4.trunc_sat_f64x2_u_zero",
    F64x2ConvertLowI32x4S: (V128, V128, ___, ___, 0, 0xFD, 0xFE) => "f64x2.convert_low_i32x4_s",
    F64x2ConvertLowI32x4U: (V128, V128, ___, ___, 0, 0xFD, 0xFF) => "f64x2.convert_low_i32x4_u",

    // > Atomic wait and notify
    MemoryAtomicNotify: (I32, I32, I32, ___, 4, 0xFE, 0x00) => "memory.atomic.notify",
    MemoryAtomicWait32: (I32, I32, I32, I64, 4, 0xFE, 0x01) => "memory.atomic.wait32",
    MemoryAtomicWait64: (I32, I32, I64, I64, 8, 0xFE, 0x02) => "memory.atomic.wait64",

    // > Atomic loads and stores
    I32AtomicLoad: (I32, I32, ___, ___, 4, 0xFE, 0x10) => "i32.atomic.load",
    I64AtomicLoad: (I64, I32, ___, ___, 8, 0xFE, 0x11) => "i64.atomic.load",
    I32AtomicLoad8U: (I32, I32, ___, ___, 1, 0xFE, 0x12) => "i32.atomic.load8_u",
    I32AtomicLoad16U: (I32, I32, ___, ___, 2, 0xFE, 0x13) => "i32.atomic.load16_u",
    I64AtomicLoad8U: (I64, I32, ___, ___, 1, 0xFE, 0x14) => "i64.atomic.load8_u",
    I64AtomicLoad16U: (I64, I32, ___, ___, 2, 0xFE, 0x15) => "i64.atomic.load16_u",
    I64AtomicLoad32U: (I64, I32, ___, ___, 4, 0xFE, 0x16) => "i64.atomic.load32_u",
    I32AtomicStore: (___, I32, I32, ___, 4, 0xFE, 0x17) => "i32.atomic.store",
    I64AtomicStore: (___, I32, I64, ___, 8, 0xFE, 0x18) => "i64.atomic.store",
    I32AtomicStore8: (___, I32, I32, ___, 1, 0xFE, 0x19) => "i32.atomic.store8",
    I32AtomicStore16: (___, I32, I32, ___, 2, 0xFE, 0x1A) => "i32.atomic.store16",
    I64AtomicStore8: (___, I32, I64, ___, 1, 0xFE, 0x1B) => "i64.atomic.store8",
    I64AtomicStore16: (___, I32, I64, ___, 2, 0xFE, 0x1C) => "i64.atomic.store16",
    I64AtomicStore32: (___, I32, I64, ___, 4, 0xFE, 0x1D) => "i64.atomic.store32",

    // > Atomic read-modify-write
    I32AtomicRmwAdd: (I32, I32, I32, ___, 4, 0xFE, 0x1E) => "i32.atomic.rmw.add",
    I64AtomicRmwAdd: (I64, I32, I64, ___, 8, 0xFE, 0x1F) => "i64.atomic.rmw.add",
    I32AtomicRmw8AddU: (I32, I32, I32, ___, 1, 0xFE, 0x20) => "i32.atomic.rmw8.add_u",
    I32AtomicRmw16AddU: (I32, I32, I32, ___, 2, 0xFE, 0x21) => "i32.atomic.rmw16.add_u",
    I64AtomicRmw8AddU: (I64, I32, I64, ___, 1, 0xFE, 0x22) => "i64.atomic.rmw8.add_u",
    I64AtomicRmw16AddU: (I64, I32, I64, ___, 2, 0xFE, 0x23) => "i64.atomic.rmw16.add_u",
    I64AtomicRmw32AddU: (I64, I32, I64, ___, 4, 0xFE, 0x24) => "i64.atomic.rmw32.add_u",
    I32AtomicRmwSub: (I32, I32, I32, ___, 4, 0xFE, 0x25) => "i32.atomic.rmw.sub",
    I64AtomicRmwSub: (I64, I32, I64, ___, 8, 0xFE, 0x26) => "i64.atomic.rmw.sub",
    I32AtomicRmw8SubU: (I32, I32, I32, ___, 1, 0xFE, 0x27) => "i32.atomic.rmw8.sub_u",
    I32AtomicRmw16SubU: (I32, I32, I32, ___, 2, 0xFE, 0x28) => "i32.atomic.rmw16.sub_u",
    I64AtomicRmw8SubU: (I64, I32, I64, ___, 1, 0xFE, 0x29) => "i64.atomic.rmw8.sub_u",
    I64AtomicRmw16SubU: (I64, I32, I64, ___, 2, 0xFE, 0x2A) => "i64.atomic.rmw16.sub_u",
    I64AtomicRmw32SubU: (I64, I32, I64, ___, 4, 0xFE, 0x2B) => "i64.atomic.rmw32.sub_u",
    I32AtomicRmwAnd: (I32, I32, I32, ___, 4, 0xFE, 0x2C) => "i32.atomic.rmw.and",
    I64AtomicRmwAnd: (I64, I32, I64, ___, 8, 0xFE, 0x2D) => "i64.atomic.rmw.and",
    I32AtomicRmw8AndU: (I32, I32, I32, ___, 1, 0xFE, 0x2E) => "i32.atomic.rmw8.and_u",
    I32AtomicRmw16AndU: (I32, I32, I32, ___, 2, 0xFE, 0x2F) => "i32.atomic.rmw16.and_u",
    I64AtomicRmw8AndU: (I64, I32, I64, ___, 1, 0xFE, 0x30) => "i64.atomic.rmw8.and_u",
    I64AtomicRmw16AndU: (I64, I32, I64, ___, 2, 0xFE, 0x31) => "i64.atomic.rmw16.and_u",
    I64AtomicRmw32AndU: (I64, I32, I64, ___, 4, 0xFE, 0x32) => "i64.atomic.rmw32.and_u",
    I32AtomicRmwOr: (I32, I32, I32, ___, 4, 0xFE, 0x33) => "i32.atomic.rmw.or",
    I64AtomicRmwOr: (I64, I32, I64, ___, 8, 0xFE, 0x34) => "i64.atomic.rmw.or",
    I32AtomicRmw8OrU: (I32, I32, I32, ___, 1, 0xFE, 0x35) => "i32.atomic.rmw8.or_u",
    I32AtomicRmw16OrU: (I32, I32, I32, ___, 2, 0xFE, 0x36) => "i32.atomic.rmw16.or_u",
    I64AtomicRmw8OrU: (I64, I32, I64, ___, 1, 0xFE, 0x37) => "i64.atomic.rmw8.or_u",
    I64AtomicRmw16OrU: (I64, I32, I64, ___, 2, 0xFE, 0x38) => "i64.atomic.rmw16.or_u",
    I64AtomicRmw32OrU: (I64, I32, I64, ___, 4, 0xFE, 0x39) => "i64.atomic.rmw32.or_u",
    I32AtomicRmwXor: (I32, I32, I32, ___, 4, 0xFE, 0x3A) => "i32.atomic.rmw.xor",
    I64AtomicRmwXor: (I64, I32, I64, ___, 8, 0xFE, 0x3B) => "i64.atomic.rmw.xor",
    I32AtomicRmw8XorU: (I32, I32, I32, ___, 1, 0xFE, 0x3C) => "i32.atomic.rmw8.xor_u",
    I32AtomicRmw16XorU: (I32, I32, I32, ___, 2, 0xFE, 0x3D) => "i32.atomic.rmw16.xor_u",
    I64AtomicRmw8XorU: (I64, I32, I64, ___, 1, 0xFE, 0x3E) => "i64.atomic.rmw8.xor_u",
    I64AtomicRmw16XorU: (I64, I32, I64, ___, 2, 0xFE, 0x3F) => "i64.atomic.rmw16.xor_u",
    I64AtomicRmw32XorU: (I64, I32, I64, ___, 4, 0xFE, 0x40) => "i64.atomic.rmw32.xor_u",
    I32AtomicRmwXchg: (I32, I32, I32, ___, 4, 0xFE, 0x41) => "i32.atomic.rmw.xchg",
    I64AtomicRmwXchg: (I64, I32, I64, ___, 8, 0xFE, 0x42) => "i64.atomic.rmw.xchg",
    I32AtomicRmw8XchgU: (I32, I32, I32, ___, 1, 0xFE, 0x43) => "i32.atomic.rmw8.xchg_u",
    I32AtomicRmw16XchgU: (I32, I32, I32, ___, 2, 0xFE, 0x44) => "i32.atomic.rmw16.xchg_u",
    I64AtomicRmw8XchgU: (I64, I32, I64, ___, 1, 0xFE, 0x45) => "i64.atomic.rmw8.xchg_u",
    I64AtomicRmw16XchgU: (I64, I32, I64, ___, 2, 0xFE, 0x46) => "i64.atomic.rmw16.xchg_u",
    I64AtomicRmw32XchgU: (I64, I32, I64, ___, 4, 0xFE, 0x47) => "i64.atomic.rmw32.xchg_u",
    I32AtomicRmwCmpxchg: (I32, I32, I32, I32, 4, 0xFE, 0x48) => "i32.atomic.rmw.cmpxchg",
    I64AtomicRmwCmpxchg: (I64, I32, I64, I64, 8, 0xFE, 0x49) => "i64.atomic.rmw.cmpxchg",
    I32AtomicRmw8CmpxchgU: (I32, I32, I32, I32, 1, 0xFE, 0x4A) => "i32.atomic.rmw8.cmpxchg_u",
    I32AtomicRmw16CmpxchgU: (I32, I32, I32, I32, 2, 0xFE, 0x4B) => "i32.atomic.rmw16.cmpxchg_u",
    I64AtomicRmw8CmpxchgU: (I64, I32, I64, I64, 1, 0xFE, 0x4C) => "i64.atomic.rmw8.cmpxchg_u",
    I64AtomicRmw16CmpxchgU: (I64, I32, I64, I64, 2, 0xFE, 0x4D) => "i64.atomic.rmw16.cmpxchg_u",
    I64AtomicRmw32CmpxchgU: (I64, I32, I64, I64, 4, 0xFE, 0x4E) => "i64.atomic.rmw32.cmpxchg_u",
}

impl Opcode {
    /// Every catalogue entry, in `(prefix, code)` order.
    pub fn all() -> &'static [Opcode] {
        ALL
    }

    /// The catalogue row for this opcode.
    pub fn info(&self) -> &'static OpcodeInfo {
        &INFO[*self as usize]
    }

    /// Look an opcode up by its binary encoding.
    /// `None` means the `(prefix, code)` pair is unknown.
    pub fn from_code(prefix: u8, code: u32) -> Option<Opcode> {
        ALL.binary_search_by_key(&(prefix, code), |op| {
            let info = op.info();
            (info.prefix, info.code)
        })
        .ok()
        .map(|at| ALL[at])
    }

    /// The canonical text-format mnemonic.
    pub fn text(&self) -> &'static str {
        self.info().text
    }

    /// The short decompiler mnemonic, if one exists.
    pub fn decomp(&self) -> Option<&'static str> {
        self.info().decomp
    }

    /// The result type, or `None` if the instruction produces no value.
    pub fn result_type(&self) -> Option<ValType> {
        self.info().result_type
    }

    /// The operand type slots.
    pub fn operand_types(&self) -> &'static [Option<ValType>; 3] {
        &self.info().operand_types
    }

    /// Result and operand types in one call, for type-checking consumers.
    pub fn signature(&self) -> (Option<ValType>, &'static [Option<ValType>; 3]) {
        let info = self.info();
        (info.result_type, &info.operand_types)
    }

    /// Number of memory bytes this instruction touches, `0` for non-memory
    /// instructions.
    pub fn memory_size(&self) -> u32 {
        self.info().memory_size
    }

    /// `log2` of the natural alignment of a memory instruction.
    /// `None` for instructions that do not touch memory.
    pub fn natural_alignment_log2(&self) -> Option<u32> {
        match self.info().memory_size {
            0 => None,
            size => Some(size.ilog2()),
        }
    }

    /// Append the binary encoding: the bare code byte, or the prefix byte
    /// followed by the ULEB128-encoded subcode.
    pub fn encode(&self, dst: &mut Vec<u8>) {
        let info = self.info();
        if info.prefix != 0 {
            dst.push(info.prefix);
            write_u32_uleb128(dst, info.code);
        } else {
            dst.push(info.code as u8);
        }
    }

    /// The proposals this opcode belongs to, derived from its encoding.
    pub fn features(&self) -> Features {
        let info = self.info();
        let mut features = Features::default();
        match info.prefix {
            0xFC => {
                features.saturating_float_to_int = true;
                features.bulk_memory = true;
                features.reference_types = true;
            }
            0xFD => features.simd = true,
            0xFE => features.threads = true,
            _ => features.sign_extension = (0xC0..=0xC4).contains(&info.code),
        }
        features
    }

    /// Whether this opcode is part of the interpreter's private bytecode.
    /// Such opcodes must never appear in a serialised module.
    pub fn is_interpreter_only(&self) -> bool {
        let info = self.info();
        info.prefix == 0 && (0xE0..=0xE4).contains(&info.code)
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

fn write_u32_uleb128(dst: &mut Vec<u8>, mut value: u32) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        dst.push(byte);
        if value == 0 {
            break;
        }
    }
}
