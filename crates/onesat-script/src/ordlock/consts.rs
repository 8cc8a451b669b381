//! Fixed opcode sequences of the OrdinalLock covenant.

/// Opcodes preceding the owner hash and payout pushes.
pub const ORDLOCK_PREFIX: [u8; 102] = [
    0x20, 0x97, 0xdf, 0xd7, 0x68, 0x51, 0xbf, 0x46, 0x5e, 0x8f, 0x71, 0x55, 0x93, 0xb2, 0x17, 0x71,
    0x48, 0x58, 0xbb, 0xe9, 0x57, 0x0f, 0xf3, 0xbd, 0x5e, 0x33, 0x84, 0x0a, 0x34, 0xe2, 0x0f, 0xf0,
    0x26, 0x21, 0x02, 0xba, 0x79, 0xdf, 0x5f, 0x8a, 0xe7, 0x60, 0x4a, 0x98, 0x30, 0xf0, 0x3c, 0x79,
    0x33, 0x02, 0x81, 0x86, 0xae, 0xde, 0x06, 0x75, 0xa1, 0x6f, 0x02, 0x5d, 0xc4, 0xf8, 0xbe, 0x8e,
    0xec, 0x03, 0x82, 0x20, 0x10, 0x08, 0xce, 0x74, 0x80, 0xda, 0x41, 0x70, 0x29, 0x18, 0xd1, 0xec,
    0x8e, 0x68, 0x49, 0xba, 0x32, 0xb4, 0xd6, 0x5b, 0x1e, 0x40, 0xdc, 0x66, 0x9c, 0x31, 0xa1, 0xe6,
    0x30, 0x6b, 0x26, 0x6c, 0x00, 0x00,
];

/// Opcodes following the payout push; they rebuild the spending
/// preimage and check the cancel signature or the purchase outputs.
pub const ORDLOCK_SUFFIX: [u8; 650] = [
    0x61, 0x51, 0x79, 0x54, 0x7a, 0x75, 0x53, 0x7a, 0x53, 0x7a, 0x53, 0x7a, 0x00, 0x79, 0x53, 0x7a,
    0x75, 0x52, 0x7a, 0x52, 0x7a, 0x75, 0x75, 0x61, 0x55, 0x79, 0x00, 0x87, 0x63, 0x56, 0x79, 0x01,
    0xc1, 0x61, 0x51, 0x79, 0x57, 0x79, 0x57, 0x79, 0x21, 0x0a, 0xc4, 0x07, 0xf0, 0xe4, 0xbd, 0x44,
    0xbf, 0xc2, 0x07, 0x35, 0x5a, 0x77, 0x8b, 0x04, 0x62, 0x25, 0xa7, 0x06, 0x8f, 0xc5, 0x9e, 0xe7,
    0xed, 0xa4, 0x3a, 0xd9, 0x05, 0xaa, 0xdb, 0xff, 0xc8, 0x00, 0x20, 0x6c, 0x26, 0x6b, 0x30, 0xe6,
    0xa1, 0x31, 0x9c, 0x66, 0xdc, 0x40, 0x1e, 0x5b, 0xd6, 0xb4, 0x32, 0xba, 0x49, 0x68, 0x8e, 0xec,
    0xd1, 0x18, 0x29, 0x70, 0x41, 0xda, 0x80, 0x74, 0xce, 0x08, 0x10, 0x59, 0x79, 0x56, 0x79, 0x61,
    0x56, 0x79, 0xaa, 0x00, 0x79, 0x61, 0x00, 0x79, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f,
    0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f,
    0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f,
    0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f,
    0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x7c, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e,
    0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e,
    0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x01, 0x00, 0x7e, 0x81, 0x51, 0x7a,
    0x75, 0x61, 0x57, 0x79, 0x56, 0x79, 0x56, 0x79, 0x56, 0x79, 0x56, 0x79, 0x61, 0x53, 0x79, 0x56,
    0x79, 0x54, 0x79, 0x57, 0x79, 0x95, 0x93, 0x95, 0x21, 0x41, 0x41, 0x36, 0xd0, 0x8c, 0x5e, 0xd2,
    0xbf, 0x3b, 0xa0, 0x48, 0xaf, 0xe6, 0xdc, 0xae, 0xba, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x51, 0x79, 0x51, 0x79, 0x61, 0x51,
    0x79, 0x51, 0x79, 0x97, 0x00, 0x79, 0x00, 0x9f, 0x63, 0x00, 0x79, 0x52, 0x79, 0x93, 0x67, 0x00,
    0x79, 0x68, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x61, 0x52, 0x7a, 0x75, 0x51,
    0x7a, 0x51, 0x79, 0x51, 0x79, 0x52, 0x96, 0xa0, 0x63, 0x00, 0x79, 0x52, 0x79, 0x94, 0x52, 0x7a,
    0x75, 0x51, 0x7a, 0x68, 0x53, 0x79, 0x82, 0x77, 0x52, 0x79, 0x82, 0x77, 0x53, 0x79, 0x01, 0x20,
    0x80, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51,
    0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51,
    0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51,
    0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51, 0x7f, 0x51,
    0x7f, 0x7c, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e,
    0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e, 0x7e,
    0x7e, 0x7e, 0x7e, 0x01, 0x20, 0x52, 0x79, 0x94, 0x7f, 0x77, 0x54, 0x53, 0x79, 0x93, 0x52, 0x79,
    0x93, 0x01, 0x30, 0x51, 0x79, 0x7e, 0x52, 0x7e, 0x54, 0x79, 0x7e, 0x58, 0x79, 0x7e, 0x52, 0x7e,
    0x53, 0x79, 0x7e, 0x52, 0x79, 0x7e, 0x57, 0x79, 0x7e, 0x00, 0x79, 0x51, 0x7a, 0x75, 0x51, 0x7a,
    0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75,
    0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x51,
    0x7a, 0x75, 0x61, 0x00, 0x79, 0x57, 0x79, 0xac, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a,
    0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75,
    0x51, 0x7a, 0x75, 0x61, 0x51, 0x7a, 0x75, 0x51, 0x7a, 0x75, 0x61, 0x69, 0x58, 0x79, 0x51, 0x79,
    0x7e, 0x58, 0x79, 0x7e, 0xaa, 0x57, 0x79, 0x61, 0x00, 0x79, 0x82, 0x77, 0x51, 0x79, 0x51, 0x79,
    0x58, 0x94, 0x7f, 0x75, 0x51, 0x79, 0x01, 0x28, 0x94, 0x7f, 0x77, 0x51, 0x7a, 0x75, 0x51, 0x7a,
    0x75, 0x61, 0x87, 0x77, 0x77, 0x77, 0x77, 0x77, 0x77, 0x77, 0x77, 0x77, 0x67, 0x55, 0x79, 0x51,
    0x87, 0x63, 0x51, 0x79, 0x57, 0x79, 0xa9, 0x87, 0x69, 0x57, 0x79, 0x57, 0x79, 0xac, 0x77, 0x77,
    0x77, 0x77, 0x77, 0x77, 0x77, 0x77, 0x67, 0x00, 0x68, 0x68,
];
