//! Per-mode frame renderers.
//!
//! Each [`LedMode`] (except [`LedMode::PartyShuffle`], which the engine
//! resolves into one of the others) maps to a renderer that mutates the
//! engine's persistent [`Frame`] once per tick. Renderers that depend on
//! chance draw from the engine's RNG, so a fixed seed reproduces the exact
//! same animation.

use crate::color::ColorPlan;
use crate::frame::Frame;
use crate::mode::LedMode;
use crate::selection::Selection;
use heapless::Vec;
use palette::Srgb;
use rand::Rng;
use rand::rngs::SmallRng;

/// Dot advance interval for the scan modes.
pub(crate) const SCAN_STEP_MS: u64 = 80;
/// Per-tick tail decay for [`LedMode::Scan`].
const SCAN_TAIL_KEEP: f32 = 0.65;
/// Background level for [`LedMode::ScanConstant`].
const SCAN_BACKGROUND: f32 = 0.08;

/// Breathing period for [`LedMode::Pulse`].
const PULSE_PERIOD_MS: u64 = 3000;
/// Dimmest point of the breathing cycle.
const PULSE_FLOOR: f32 = 0.05;

/// Full lub-dub-rest cycle for [`LedMode::Heartbeat`].
const HEARTBEAT_CYCLE_MS: u64 = 1100;
const HEARTBEAT_DUB_AT_MS: u64 = 300;
const HEARTBEAT_DECAY_MS: f32 = 180.0;
const HEARTBEAT_DUB_AMP: f32 = 0.55;
const HEARTBEAT_FLOOR: f32 = 0.04;

/// Automaton generation interval.
const AUTOMATON_STEP_MS: u64 = 120;
/// Elementary rule applied around the ring.
const AUTOMATON_RULE: u8 = 30;

/// Upper bound on simultaneously live sparks.
const TWINKLE_MAX_SPARKS: usize = 8;
/// Lifetime of a single spark.
const TWINKLE_TTL_MS: u64 = 900;
const TWINKLE_ATTACK_MS: u64 = 120;
/// Spawn probability per tick while below capacity.
const TWINKLE_SPAWN_CHANCE: f64 = 0.25;

/// Beat interval (125 BPM).
const BEAT_MS: u64 = 480;
const KICK_DECAY_MS: f32 = 100.0;
const HAT_DECAY_MS: f32 = 70.0;
const HAT_AMP: f32 = 0.45;

/// Fraction of the strip lit before the meter turns yellow, then red.
const VU_GREEN_ZONE: f32 = 0.6;
const VU_YELLOW_ZONE: f32 = 0.85;
const VU_BODY_LEVEL: f32 = 0.65;

/// Inputs a renderer may consult when producing a frame.
pub(crate) struct RenderContext<'a> {
    /// Milliseconds since the animation started (pause-compensated).
    pub elapsed_ms: u64,
    /// Resolved color plan for this frame.
    pub plan: ColorPlan,
    /// Externally fed signal level in 0.0-1.0, for level-driven modes.
    pub level: f32,
    /// Shared RNG for stochastic renderers.
    pub rng: &'a mut SmallRng,
}

fn dim(color: Srgb, factor: f32) -> Srgb {
    let factor = factor.clamp(0.0, 1.0);
    Srgb::new(color.red * factor, color.green * factor, color.blue * factor)
}

/// The active renderer for one animation mode.
pub(crate) enum ModeRenderer<const N: usize> {
    Scan(Scan),
    Pulse(Pulse),
    Heartbeat(Heartbeat),
    Automaton(Automaton<N>),
    Twinkle(Twinkle<N>),
    BootsAndPants(BootsAndPants),
    VuMeter(VuMeter),
}

impl<const N: usize> ModeRenderer<N> {
    /// Builds the renderer for a mode.
    ///
    /// The engine swaps [`LedMode::PartyShuffle`] for a concrete draw before
    /// building; a direct request gets the same treatment.
    pub fn for_mode(mode: LedMode, rng: &mut SmallRng) -> Self {
        match mode {
            LedMode::Scan => ModeRenderer::Scan(Scan::new(false)),
            LedMode::ScanConstant => ModeRenderer::Scan(Scan::new(true)),
            LedMode::Pulse => ModeRenderer::Pulse(Pulse),
            LedMode::Heartbeat => ModeRenderer::Heartbeat(Heartbeat),
            LedMode::CellularAutomaton => ModeRenderer::Automaton(Automaton::new(rng)),
            LedMode::Twinkle => ModeRenderer::Twinkle(Twinkle::new()),
            LedMode::BootsAndPants => ModeRenderer::BootsAndPants(BootsAndPants),
            LedMode::VuMeter => ModeRenderer::VuMeter(VuMeter),
            LedMode::PartyShuffle => {
                let pick = Selection::random_non_shuffle(rng).mode;
                Self::for_mode(pick, rng)
            }
        }
    }

    /// Advances the animation by one tick, mutating `frame` in place.
    pub fn render(&mut self, ctx: &mut RenderContext<'_>, frame: &mut Frame<N>) {
        if N == 0 {
            return;
        }

        match self {
            ModeRenderer::Scan(scan) => scan.render(ctx, frame),
            ModeRenderer::Pulse(pulse) => pulse.render(ctx, frame),
            ModeRenderer::Heartbeat(heartbeat) => heartbeat.render(ctx, frame),
            ModeRenderer::Automaton(automaton) => automaton.render(ctx, frame),
            ModeRenderer::Twinkle(twinkle) => twinkle.render(ctx, frame),
            ModeRenderer::BootsAndPants(beat) => beat.render(ctx, frame),
            ModeRenderer::VuMeter(meter) => meter.render(ctx, frame),
        }
    }
}

// ---------------------------------------------------------------------------
// Scan / ScanConstant
// ---------------------------------------------------------------------------

/// A dot sweeping back and forth, with or without a lit background.
pub(crate) struct Scan {
    constant_background: bool,
}

impl Scan {
    fn new(constant_background: bool) -> Self {
        Self {
            constant_background,
        }
    }

    /// Ping-pong position over `n` LEDs at a given step count.
    fn position(step: u64, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        let span = 2 * (n - 1) as u64;
        let phase = (step % span) as usize;
        if phase < n { phase } else { 2 * (n - 1) - phase }
    }

    fn render<const N: usize>(&mut self, ctx: &mut RenderContext<'_>, frame: &mut Frame<N>) {
        if self.constant_background {
            for i in 0..N {
                frame.set(i, dim(ctx.plan.color_for(i), SCAN_BACKGROUND));
            }
        } else {
            frame.scale(SCAN_TAIL_KEEP);
        }

        let pos = Self::position(ctx.elapsed_ms / SCAN_STEP_MS, N);
        frame.set(pos, ctx.plan.color_for(pos));
    }
}

// ---------------------------------------------------------------------------
// Pulse
// ---------------------------------------------------------------------------

/// Whole-strip sine breathing between a dim floor and full brightness.
pub(crate) struct Pulse;

impl Pulse {
    fn brightness(elapsed_ms: u64) -> f32 {
        let t = (elapsed_ms % PULSE_PERIOD_MS) as f32 / PULSE_PERIOD_MS as f32;
        // Start at the floor and rise first
        let angle = t * 2.0 * core::f32::consts::PI - core::f32::consts::FRAC_PI_2;
        let wave = 0.5 * (1.0 + libm::sinf(angle));
        PULSE_FLOOR + (1.0 - PULSE_FLOOR) * wave
    }

    fn render<const N: usize>(&mut self, ctx: &mut RenderContext<'_>, frame: &mut Frame<N>) {
        let brightness = Self::brightness(ctx.elapsed_ms);
        for i in 0..N {
            frame.set(i, dim(ctx.plan.color_for(i), brightness));
        }
    }
}

// ---------------------------------------------------------------------------
// Heartbeat
// ---------------------------------------------------------------------------

/// Lub-dub double beat: a strong flash, a weaker echo, then rest.
pub(crate) struct Heartbeat;

impl Heartbeat {
    fn envelope(elapsed_ms: u64) -> f32 {
        let t = elapsed_ms % HEARTBEAT_CYCLE_MS;

        let lub = libm::expf(-(t as f32) / HEARTBEAT_DECAY_MS);
        let dub = if t >= HEARTBEAT_DUB_AT_MS {
            HEARTBEAT_DUB_AMP * libm::expf(-((t - HEARTBEAT_DUB_AT_MS) as f32) / HEARTBEAT_DECAY_MS)
        } else {
            0.0
        };

        HEARTBEAT_FLOOR + (1.0 - HEARTBEAT_FLOOR) * (lub + dub).min(1.0)
    }

    fn render<const N: usize>(&mut self, ctx: &mut RenderContext<'_>, frame: &mut Frame<N>) {
        let brightness = Self::envelope(ctx.elapsed_ms);
        for i in 0..N {
            frame.set(i, dim(ctx.plan.color_for(i), brightness));
        }
    }
}

// ---------------------------------------------------------------------------
// Cellular automaton
// ---------------------------------------------------------------------------

/// Applies an elementary rule to a ring of cells (neighbors wrap).
fn automaton_step<const N: usize>(cells: &[bool; N], rule: u8) -> [bool; N] {
    let mut next = [false; N];
    for i in 0..N {
        let left = cells[(i + N - 1) % N];
        let right = cells[(i + 1) % N];
        let index = (left as u8) << 2 | (cells[i] as u8) << 1 | right as u8;
        next[i] = (rule >> index) & 1 == 1;
    }
    next
}

/// Elementary cellular automaton stepped around the strip.
///
/// Live cells show the plan color. The population reseeds when it dies out
/// or settles into a fixed point or two-step cycle.
pub(crate) struct Automaton<const N: usize> {
    cells: [bool; N],
    prev: [bool; N],
    next_step_ms: u64,
}

impl<const N: usize> Automaton<N> {
    fn new(rng: &mut SmallRng) -> Self {
        let mut automaton = Self {
            cells: [false; N],
            prev: [false; N],
            next_step_ms: AUTOMATON_STEP_MS,
        };
        automaton.reseed(rng);
        automaton
    }

    fn reseed(&mut self, rng: &mut SmallRng) {
        for cell in &mut self.cells {
            *cell = rng.gen_bool(0.5);
        }
        if self.cells.iter().all(|cell| !cell) {
            self.cells[0] = true;
        }
        self.prev = [false; N];
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>, frame: &mut Frame<N>) {
        while ctx.elapsed_ms >= self.next_step_ms {
            let next = automaton_step(&self.cells, AUTOMATON_RULE);

            let stagnant =
                next == self.cells || next == self.prev || next.iter().all(|cell| !cell);
            self.prev = self.cells;
            if stagnant {
                self.reseed(ctx.rng);
            } else {
                self.cells = next;
            }

            self.next_step_ms += AUTOMATON_STEP_MS;
        }

        for i in 0..N {
            let color = if self.cells[i] {
                ctx.plan.color_for(i)
            } else {
                crate::COLOR_OFF
            };
            frame.set(i, color);
        }
    }
}

// ---------------------------------------------------------------------------
// Twinkle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Spark {
    led: usize,
    born_ms: u64,
}

/// Random sparks that flare up quickly and fade out.
pub(crate) struct Twinkle<const N: usize> {
    sparks: Vec<Spark, TWINKLE_MAX_SPARKS>,
}

impl<const N: usize> Twinkle<N> {
    fn new() -> Self {
        Self { sparks: Vec::new() }
    }

    fn spark_brightness(age_ms: u64) -> f32 {
        if age_ms < TWINKLE_ATTACK_MS {
            age_ms as f32 / TWINKLE_ATTACK_MS as f32
        } else {
            let decay = (age_ms - TWINKLE_ATTACK_MS) as f32;
            let span = (TWINKLE_TTL_MS - TWINKLE_ATTACK_MS) as f32;
            (1.0 - decay / span).max(0.0)
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>, frame: &mut Frame<N>) {
        let elapsed = ctx.elapsed_ms;
        self.sparks
            .retain(|spark| elapsed.saturating_sub(spark.born_ms) < TWINKLE_TTL_MS);

        if !self.sparks.is_full() && ctx.rng.gen_bool(TWINKLE_SPAWN_CHANCE) {
            let led = ctx.rng.gen_range(0..N);
            // Skip the draw if the LED already has a live spark
            if !self.sparks.iter().any(|spark| spark.led == led) {
                let _ = self.sparks.push(Spark {
                    led,
                    born_ms: elapsed,
                });
            }
        }

        frame.clear();
        for spark in &self.sparks {
            let age = elapsed.saturating_sub(spark.born_ms);
            let brightness = Self::spark_brightness(age);
            frame.set(spark.led, dim(ctx.plan.color_for(spark.led), brightness));
        }
    }
}

// ---------------------------------------------------------------------------
// Boots and pants
// ---------------------------------------------------------------------------

/// Four-on-the-floor: a whole-strip kick on the beat, offbeat accents on
/// alternating LEDs between beats.
pub(crate) struct BootsAndPants;

impl BootsAndPants {
    fn kick_envelope(t_in_beat: u64) -> f32 {
        libm::expf(-(t_in_beat as f32) / KICK_DECAY_MS)
    }

    fn hat_envelope(t_in_beat: u64) -> f32 {
        let offbeat = BEAT_MS / 2;
        if t_in_beat >= offbeat {
            HAT_AMP * libm::expf(-((t_in_beat - offbeat) as f32) / HAT_DECAY_MS)
        } else {
            0.0
        }
    }

    fn render<const N: usize>(&mut self, ctx: &mut RenderContext<'_>, frame: &mut Frame<N>) {
        let t_in_beat = ctx.elapsed_ms % BEAT_MS;
        let kick = Self::kick_envelope(t_in_beat);
        let hat = Self::hat_envelope(t_in_beat);

        for i in 0..N {
            let mut brightness = kick;
            if i % 2 == 1 {
                brightness += hat;
            }
            frame.set(i, dim(ctx.plan.color_for(i), brightness.min(1.0)));
        }
    }
}

// ---------------------------------------------------------------------------
// VU meter
// ---------------------------------------------------------------------------

/// Level bar fed by [`crate::BadgeEngine::set_level`].
pub(crate) struct VuMeter;

impl VuMeter {
    fn zone_color(fraction: f32) -> Srgb {
        if fraction < VU_GREEN_ZONE {
            Srgb::new(0.0, 1.0, 0.0)
        } else if fraction < VU_YELLOW_ZONE {
            Srgb::new(1.0, 1.0, 0.0)
        } else {
            Srgb::new(1.0, 0.0, 0.0)
        }
    }

    fn render<const N: usize>(&mut self, ctx: &mut RenderContext<'_>, frame: &mut Frame<N>) {
        let level = ctx.level.clamp(0.0, 1.0);
        let lit = (level * N as f32 + 0.5) as usize;
        let lit = lit.min(N);

        frame.clear();
        for i in 0..lit {
            let color = match ctx.plan {
                // Multi gives the meter its classic green/yellow/red zones
                ColorPlan::Spread => Self::zone_color(i as f32 / N as f32),
                ColorPlan::Solid(color) => color,
            };
            let brightness = if i + 1 == lit { 1.0 } else { VU_BODY_LEVEL };
            frame.set(i, dim(color, brightness));
        }
    }
}
