//! Structural content hash for [`Value`]s.
//!
//! The default hash function of [`crate::SchemaSet`]. Algorithm: djb2-style
//! mixing with 32-bit wrapping arithmetic, a per-variant discriminator, and
//! map keys visited in sorted order so insertion order does not matter.
//!
//! String lengths and characters are mixed as UTF-16 code units.

use crate::value::{Map, Value};

pub const START_STATE: i32 = 5381;

pub const NULL_CONST: i32 = 982452847_u32 as i32;
pub const TRUE_CONST: i32 = 982453247_u32 as i32;
pub const FALSE_CONST: i32 = 982454243_u32 as i32;
pub const LIST_CONST: i32 = 982452259_u32 as i32;
pub const STRING_CONST: i32 = 982453601_u32 as i32;
pub const MAP_CONST: i32 = 982454533_u32 as i32;
pub const INT_CONST: i32 = 982455007_u32 as i32;
pub const FLOAT_CONST: i32 = 982455299_u32 as i32;
pub const SET_CONST: i32 = 982455539_u32 as i32;

/// `state = (state << 5) + state + num`, wrapping.
pub fn update_num(state: i32, num: i32) -> i32 {
    state.wrapping_shl(5).wrapping_add(state).wrapping_add(num)
}

fn update_wide(state: i32, bits: u64) -> i32 {
    let state = update_num(state, bits as u32 as i32);
    update_num(state, (bits >> 32) as u32 as i32)
}

pub fn update_str(mut state: i32, s: &str) -> i32 {
    let utf16: Vec<u16> = s.encode_utf16().collect();
    state = update_num(state, STRING_CONST);
    state = update_num(state, utf16.len() as i32);
    for &code_unit in utf16.iter().rev() {
        state = update_num(state, code_unit as i32);
    }
    state
}

pub fn update_value(state: i32, value: &Value) -> i32 {
    match value {
        Value::Null => update_num(state, NULL_CONST),
        Value::Bool(b) => update_num(state, if *b { TRUE_CONST } else { FALSE_CONST }),
        Value::Int(n) => update_wide(update_num(state, INT_CONST), *n as u64),
        Value::Float(f) => update_wide(update_num(state, FLOAT_CONST), f.to_bits()),
        Value::String(s) => update_str(state, s),
        Value::List(items) => {
            let mut state = update_num(state, LIST_CONST);
            for item in items {
                state = update_value(state, item);
            }
            state
        }
        Value::Map(map) => update_map(state, map),
        Value::Set(set) => {
            // Element codes already summarize each element.
            let mut state = update_num(state, SET_CONST);
            for code in set.codes() {
                state = update_num(state, *code as i32);
            }
            state
        }
    }
}

pub fn update_map(state: i32, map: &Map) -> i32 {
    let mut state = update_num(state, MAP_CONST);
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    for key in keys {
        state = update_str(state, key);
        state = update_value(state, &map[key]);
    }
    state
}

/// Hash a value. The sign is meaningful: set keys use its absolute value.
pub fn hash_value(value: &Value) -> i32 {
    update_value(START_STATE, value)
}
