//! The watchdog device handle.
//!
//! A [`WatchDog`] maps each device operation onto one [`Command`], runs it
//! through the locked [`Transport`] and validates the reply. Calls are
//! independent transactions: nothing is cached between them and nothing is
//! retried.

use std::sync::Arc;

use tracing::debug;
use watchdog_protocol::{
    check_ping, parse_params, parse_version, split_reply, Channel, Command, Params, SwitchState,
    TestAction,
};

use crate::config::{ChannelPolicy, DriverConfig};
use crate::error::Result;
use crate::transport::{Connector, SerialConnector, Transport};

/// Handle to one attached watchdog.
///
/// Safe to share between threads; concurrent calls are serialized so only one
/// transaction is on the wire at a time.
#[derive(Debug)]
pub struct WatchDog {
    transport: Transport,
}

impl WatchDog {
    /// Handle for the serial port `name` with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, DriverConfig::default())
    }

    /// Handle for the serial port `name` with custom settings.
    pub fn with_config(name: impl Into<String>, config: DriverConfig) -> Self {
        Self::with_connector(name, config, Arc::new(SerialConnector))
    }

    /// Handle that opens its connections through `connector`.
    pub fn with_connector(name: impl Into<String>, config: DriverConfig, connector: Arc<dyn Connector>) -> Self {
        WatchDog {
            transport: Transport::new(name, config, connector),
        }
    }

    /// Serial port name.
    pub fn name(&self) -> &str {
        self.transport.port()
    }

    pub fn config(&self) -> &DriverConfig {
        self.transport.config()
    }

    /// Send `command` and return the reply payload.
    ///
    /// Commands without a reply return an empty payload.
    fn send_command(&self, command: &Command) -> Result<Vec<u8>> {
        let frame = command.encode();
        debug!(port = self.name(), command = command.name(), "send");

        let reply = self.transport.exchange(&frame, command.expects_reply())?;
        match reply {
            Some(reply) => Ok(split_reply(command.mnemonic(), &reply)?.to_vec()),
            None => Ok(Vec::new()),
        }
    }

    /// Send a touch or turn command, applying the channel policy first.
    fn send_channel_command(&self, command: Command) -> Result<()> {
        if let Err(err) = command.validate() {
            match self.config().channel_policy {
                ChannelPolicy::Reject => return Err(err.into()),
                ChannelPolicy::Ignore => {
                    debug!(port = self.name(), %err, "channel ignored");
                    return Ok(());
                }
            }
        }
        self.send_command(&command)?;
        Ok(())
    }

    /// Check that the device answers with the ping acknowledgement.
    pub fn ping(&self) -> Result<bool> {
        let frame = Command::Ping.encode();
        debug!(port = self.name(), command = "ping", "send");

        let reply = self.transport.exchange(&frame, true)?.unwrap_or_default();
        check_ping(&reply)?;
        Ok(true)
    }

    /// Firmware version string.
    pub fn version(&self) -> Result<String> {
        let payload = self.send_command(&Command::Version)?;
        Ok(parse_version(&payload))
    }

    /// Read the stored parameter block.
    pub fn read_params(&self) -> Result<Params> {
        let payload = self.send_command(&Command::ReadParams)?;
        Ok(parse_params(&payload))
    }

    /// Store a parameter block. The reply payload is discarded.
    pub fn write_params(&self, params: &Params) -> Result<()> {
        self.send_command(&Command::WriteParams(*params))?;
        Ok(())
    }

    /// Short press on relay channel 1 or 2.
    pub fn touch(&self, channel: Channel) -> Result<()> {
        self.send_channel_command(Command::Touch(channel))
    }

    /// Switch relay channel 1 or 2 on.
    pub fn turn_on(&self, channel: Channel) -> Result<()> {
        self.send_channel_command(Command::TurnOn(channel))
    }

    /// Switch relay channel 1 or 2 off.
    pub fn turn_off(&self, channel: Channel) -> Result<()> {
        self.send_channel_command(Command::TurnOff(channel))
    }

    /// Suspend (`On`) or resume (`Off`) the watchdog timer.
    pub fn pause(&self, state: SwitchState) -> Result<()> {
        self.send_command(&Command::Pause(state))?;
        Ok(())
    }

    /// Status LED on or off.
    pub fn light(&self, state: SwitchState) -> Result<()> {
        self.send_command(&Command::Light(state))?;
        Ok(())
    }

    /// Trigger a test action. The device does not reply.
    pub fn test(&self, action: TestAction) -> Result<()> {
        self.send_command(&Command::Test(action))?;
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        self.test(TestAction::Reset)
    }

    pub fn hard_reset(&self) -> Result<()> {
        self.test(TestAction::HardReset)
    }

    pub fn power_off(&self) -> Result<()> {
        self.test(TestAction::PowerOff)
    }

    /// Reboot the device into its bootloader. The device does not reply.
    pub fn enter_bootloader(&self) -> Result<()> {
        self.send_command(&Command::Bootloader)?;
        Ok(())
    }

    /// Raw payload of the input channel reply.
    pub fn read_input(&self) -> Result<Vec<u8>> {
        self.send_command(&Command::Input)
    }
}
