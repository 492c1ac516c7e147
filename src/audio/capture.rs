use crate::config::AudioConfig;
use crate::error::{ResampleError, Result};
use audio_thread_priority::RtPriorityHandle;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::Sender;

/// Live input stream from the default capture device
///
/// Interleaved buffers are forwarded to the processing thread over `tx`.
pub struct AudioCapture {
    stream: cpal::Stream,
    _rt_handle: Option<RtPriorityHandle>,
}

impl AudioCapture {
    pub fn new(config: &AudioConfig, tx: Sender<Vec<f32>>) -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| ResampleError::AudioDevice("No input device found".into()))?;

        match device.description() {
            Ok(desc) => log::info!("Input device: {:?}", desc),
            Err(_) => log::info!("Input device: Unknown"),
        }

        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: config.sample_rate,
            buffer_size: cpal::BufferSize::Fixed(config.buffer_size as u32),
        };

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if tx.try_send(data.to_vec()).is_err() {
                        log::warn!("Processing thread behind, dropped capture buffer");
                    }
                },
                |err| log::error!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| ResampleError::AudioStream(format!("{}", e)))?;

        let rt_handle = match audio_thread_priority::promote_current_thread_to_real_time(
            config.buffer_size as u32,
            config.sample_rate,
        ) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("Could not set real-time priority: {}", e);
                None
            }
        };

        stream
            .play()
            .map_err(|e| ResampleError::AudioStream(format!("{}", e)))?;

        Ok(Self {
            stream,
            _rt_handle: rt_handle,
        })
    }
}

impl Drop for AudioCapture {
    fn drop(&mut self) {
        let _ = self.stream.pause();
    }
}
