// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Demonstration object graph: a two-axis motor controller.

use std::sync::atomic::AtomicU32;

use fibre_micro::{introspect, leaf_enum, Property, ReadOnly};

leaf_enum! {
    /// Axis state machine states
    pub enum AxisState: u8 {
        Undefined = 0,
        Idle = 1,
        StartupSequence = 2,
        FullCalibrationSequence = 3,
        MotorCalibration = 4,
        EncoderIndexSearch = 6,
        EncoderOffsetCalibration = 7,
        ClosedLoopControl = 8,
    }
}

leaf_enum! {
    /// Controller loop selection
    pub enum ControlMode: u8 {
        Voltage = 0,
        Torque = 1,
        Velocity = 2,
        Position = 3,
    }
}

pub struct MotorConfig {
    pub current_lim: Property<f32>,
    pub calibration_current: Property<f32>,
    pub pole_pairs: Property<i32>,
}

pub struct Motor {
    pub config: MotorConfig,
    pub is_calibrated: ReadOnly<bool>,
    pub current_meas: ReadOnly<f32>,
    pub error: AtomicU32,
}

pub struct Controller {
    pub control_mode: Property<ControlMode>,
    pub input_vel: Property<f32>,
    pub vel_gain: Property<f32>,
}

pub struct Axis {
    pub current_state: ReadOnly<AxisState>,
    pub requested_state: Property<AxisState>,
    pub motor: Motor,
    pub controller: Controller,
}

impl Axis {
    fn new() -> Self {
        Self {
            current_state: ReadOnly::new(AxisState::Idle),
            requested_state: Property::new(AxisState::Undefined),
            motor: Motor {
                config: MotorConfig {
                    current_lim: Property::new(10.0),
                    calibration_current: Property::new(10.0),
                    pole_pairs: Property::new(7),
                },
                is_calibrated: ReadOnly::new(false),
                current_meas: ReadOnly::new(0.0),
                error: AtomicU32::new(0),
            },
            controller: Controller {
                control_mode: Property::new(ControlMode::Velocity),
                input_vel: Property::new(0.0),
                vel_gain: Property::new(0.16),
            },
        }
    }

    /// Whether the axis is actively driving its motor
    fn is_armed(&self) -> bool {
        self.current_state.get() == AxisState::ClosedLoopControl
    }
}

pub struct Device {
    pub vbus_voltage: ReadOnly<f32>,
    pub serial_number: ReadOnly<u64>,
    pub axis0: Axis,
    pub axis1: Axis,
}

impl Device {
    /// Controller as it looks right after power-up
    pub fn power_on() -> Self {
        Self {
            vbus_voltage: ReadOnly::new(24.1),
            serial_number: ReadOnly::new(0x2061_3848_4D4B),
            axis0: Axis::new(),
            axis1: Axis::new(),
        }
    }
}

introspect! {
    MotorConfig {
        current_lim: Property<f32>,
        calibration_current: Property<f32>,
        pole_pairs: Property<i32>,
    }
}

introspect! {
    Motor {
        config: MotorConfig,
        is_calibrated: ReadOnly<bool>,
        current_meas: ReadOnly<f32>,
        error: AtomicU32,
    }
}

introspect! {
    Controller {
        control_mode: Property<ControlMode>,
        input_vel: Property<f32>,
        vel_gain: Property<f32>,
    }
}

introspect! {
    Axis {
        current_state: ReadOnly<AxisState>,
        requested_state: Property<AxisState>,
        motor: Motor,
        controller: Controller,
    }
    computed {
        is_armed: bool,
    }
}

introspect! {
    Device {
        vbus_voltage: ReadOnly<f32>,
        serial_number: ReadOnly<u64>,
        axis0: Axis,
        axis1: Axis,
    }
}
