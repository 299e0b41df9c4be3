//! OI opcode and sensor packet ID constants
//!
//! The full vendor-documented set is kept here even though the driver only
//! issues a subset; the values come straight from the vendor's OI manual.

// Control
pub const OP_START: u8 = 128;
pub const OP_BAUD: u8 = 129;
pub const OP_SAFE: u8 = 131;
pub const OP_FULL: u8 = 132;
pub const OP_POWER: u8 = 133;
pub const OP_DOCK: u8 = 143;
pub const OP_STOP: u8 = 173;
pub const OP_RESET: u8 = 7;

// Motors
pub const OP_DRIVE: u8 = 137;
pub const OP_MOTORS: u8 = 138;
pub const OP_MOTORS_PWM: u8 = 144;
pub const OP_DRIVE_DIRECT: u8 = 145;
pub const OP_DRIVE_PWM: u8 = 146;

// Lights and display
pub const OP_LEDS: u8 = 139;
pub const OP_DIGITS_RAW: u8 = 163;
pub const OP_DIGITS_ASCII: u8 = 164;

// Sensors
pub const OP_SENSORS: u8 = 142;
pub const OP_SENSOR_STREAM: u8 = 148;
pub const OP_SENSOR_QUERY_LIST: u8 = 149;
pub const OP_SENSOR_STREAM_PAUSE_RESUME: u8 = 150;

// Sensor packet IDs
pub const SENSOR_BUMPS_WHEELDROPS: u8 = 7;
pub const SENSOR_WALL: u8 = 8;
pub const SENSOR_CLIFF_LEFT: u8 = 9;
pub const SENSOR_CLIFF_FRONT_LEFT: u8 = 10;
pub const SENSOR_CLIFF_FRONT_RIGHT: u8 = 11;
pub const SENSOR_CLIFF_RIGHT: u8 = 12;
pub const SENSOR_VIRTUAL_WALL: u8 = 13;
pub const SENSOR_WHEEL_OVERCURRENTS: u8 = 14;
pub const SENSOR_DIRT_DETECT: u8 = 15;
pub const SENSOR_BUTTONS: u8 = 18;
pub const SENSOR_DISTANCE: u8 = 19;
pub const SENSOR_ANGLE: u8 = 20;
pub const SENSOR_CHARGE_STATE: u8 = 21;
pub const SENSOR_VOLTAGE: u8 = 22;
pub const SENSOR_CURRENT: u8 = 23;
pub const SENSOR_BATTERY_TEMP: u8 = 24;
pub const SENSOR_BATTERY_CHARGE: u8 = 25;
pub const SENSOR_BATTERY_CAPACITY: u8 = 26;
pub const SENSOR_WALL_SIGNAL: u8 = 27;
pub const SENSOR_OI_MODE: u8 = 35;
pub const SENSOR_REQ_VEL: u8 = 39;
pub const SENSOR_REQ_RADIUS: u8 = 40;
pub const SENSOR_REQ_VEL_RIGHT: u8 = 41;
pub const SENSOR_REQ_VEL_LEFT: u8 = 42;
pub const SENSOR_ENC_LEFT: u8 = 43;
pub const SENSOR_ENC_RIGHT: u8 = 44;
pub const SENSOR_LIGHT_BUMPER: u8 = 45;
pub const SENSOR_MOTOR_CURRENT_LEFT: u8 = 54;
pub const SENSOR_MOTOR_CURRENT_RIGHT: u8 = 55;
pub const SENSOR_STASIS: u8 = 58;

/// Sensor packets requested by the telemetry stream, in wire order
pub const STREAM_SENSORS: [u8; 4] = [
    SENSOR_BATTERY_CHARGE,
    SENSOR_BATTERY_CAPACITY,
    SENSOR_ENC_RIGHT,
    SENSOR_ENC_LEFT,
];

/// Wheel velocity limit for drive-direct, in mm/s
pub const DRIVE_VELOCITY_MAX: i16 = 500;

/// PWM limit for drive-pwm
pub const DRIVE_PWM_MAX: i16 = 255;
