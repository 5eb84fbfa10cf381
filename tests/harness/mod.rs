#![allow(dead_code)]

use easel_abi::{Field, Schema, SchemaBuilder};
use easel_types::{Bytes, GuestPtr};

/// Installs a fmt subscriber so heap warnings show up in test output.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/* struct SDL_Surface {
    Uint32 flags;
    int format;
    int w;
    int h;
    int pitch;
    void *pixels;
    int refcount;
    void *reserved;
}; */
pub struct SurfaceFields {
    pub flags: Field<u32>,
    pub format: Field<i32>,
    pub w: Field<i32>,
    pub h: Field<i32>,
    pub pitch: Field<Bytes>,
    pub pixels: Field<GuestPtr>,
    pub refcount: Field<i32>,
    pub reserved: Field<GuestPtr>,
}

pub fn surface_schema() -> (SurfaceFields, Schema) {
    let mut b = SchemaBuilder::new();
    let fields = SurfaceFields {
        flags: b.field::<u32>("flags"),
        format: b.field::<i32>("format"),
        w: b.field::<i32>("w"),
        h: b.field::<i32>("h"),
        pitch: b.field::<i32>("pitch").cast(),
        pixels: b.field::<u32>("pixels").cast(),
        refcount: b.field::<i32>("refcount"),
        reserved: b.field::<u32>("reserved").cast(),
    };
    (fields, b.finish())
}

/* struct SDL_KeyboardEvent {
    Uint32 type;
    Uint32 reserved;
    Uint64 timestamp;
    Uint32 windowID;
    Uint32 which;
    Uint32 scancode;
    Uint32 key;
    Uint32 mod;
    Uint16 raw;
    bool down;
    bool repeat;
}; */
pub struct KeyEventFields {
    pub event_type: Field<u32>,
    pub timestamp: Field<u64>,
    pub window_id: Field<u32>,
    pub which: Field<u32>,
    pub scancode: Field<u32>,
    pub key: Field<u32>,
    pub modifiers: Field<u32>,
    pub raw: Field<u16>,
    pub down: Field<bool>,
    pub repeat: Field<bool>,
}

pub fn key_event_schema() -> (KeyEventFields, Schema) {
    let mut b = SchemaBuilder::new();
    let event_type = b.field::<u32>("type");
    b.field::<u32>("reserved");
    let timestamp = b.field::<u64>("timestamp");
    let fields = KeyEventFields {
        event_type,
        timestamp,
        window_id: b.field::<u32>("windowID"),
        which: b.field::<u32>("which"),
        scancode: b.field::<u32>("scancode"),
        key: b.field::<u32>("key"),
        modifiers: b.field::<u32>("mod"),
        raw: b.field::<u16>("raw"),
        down: b.field::<bool>("down"),
        repeat: b.field::<bool>("repeat"),
    };
    (fields, b.finish())
}
