use crate::constants::*;
use crate::core::{SignalSampler, SpectrumSource};
use wasm_bindgen::prelude::*;
use web_sys as web;

impl SpectrumSource for web::AnalyserNode {
    fn fill_byte_frequency_data(&self, out: &mut [u8]) {
        self.get_byte_frequency_data(out);
    }
}

/// Attach an analyser to `node` on the node's own context and wrap it in a
/// sampler. The upstream node is only connected, never owned.
pub fn tap(node: &web::AudioNode) -> anyhow::Result<SignalSampler<web::AnalyserNode>> {
    let ctx = node.context();
    let analyser = web::AnalyserNode::new(&ctx)
        .map_err(|e| anyhow::anyhow!("AnalyserNode error: {:?}", e))?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE);
    node.connect_with_audio_node(&analyser)
        .map_err(|e| anyhow::anyhow!("analyser connect error: {:?}", e))?;
    Ok(SignalSampler::new(analyser, ANALYSER_FFT_SIZE))
}

fn create_context(sample_rate: f32, label: &str) -> anyhow::Result<web::AudioContext> {
    let opts = web::AudioContextOptions::new();
    opts.set_sample_rate(sample_rate);
    web::AudioContext::new_with_context_options(&opts)
        .map_err(|e| anyhow::anyhow!("{} AudioContext error: {:?}", label, e))
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(ctx).map_err(|e| anyhow::anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

/// The pair of audio graphs a conversational page feeds the visualizer:
/// microphone-rate input (16 kHz) and playback-rate output (24 kHz), each
/// ending in a gain node that can be tapped. Only the output graph is
/// audible.
#[wasm_bindgen]
pub struct AudioTaps {
    input_ctx: web::AudioContext,
    output_ctx: web::AudioContext,
    input_gain: web::GainNode,
    output_gain: web::GainNode,
}

impl AudioTaps {
    pub fn build() -> anyhow::Result<Self> {
        let input_ctx = create_context(INPUT_SAMPLE_RATE, "input")?;
        let output_ctx = create_context(OUTPUT_SAMPLE_RATE, "output")?;
        let input_gain = create_gain(&input_ctx, 1.0, "input")?;
        let output_gain = create_gain(&output_ctx, 1.0, "output")?;
        output_gain
            .connect_with_audio_node(&output_ctx.destination())
            .map_err(|e| anyhow::anyhow!("output connect error: {:?}", e))?;
        Ok(Self {
            input_ctx,
            output_ctx,
            input_gain,
            output_gain,
        })
    }
}

#[wasm_bindgen]
impl AudioTaps {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<AudioTaps, JsValue> {
        Self::build().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
    }

    #[wasm_bindgen(getter, js_name = inputNode)]
    pub fn input_node(&self) -> web::AudioNode {
        self.input_gain.clone().into()
    }

    #[wasm_bindgen(getter, js_name = outputNode)]
    pub fn output_node(&self) -> web::AudioNode {
        self.output_gain.clone().into()
    }

    /// Browsers start contexts suspended until a user gesture.
    pub fn resume(&self) {
        _ = self.input_ctx.resume();
        _ = self.output_ctx.resume();
    }
}
