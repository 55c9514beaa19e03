mod common;

use num::complex::Complex32;
use ofdm64_sync::{ConsumerAction, FrameSynchronizer, SyncState, SynchronizerSettings};
use quickcheck_macros::quickcheck;
use std::cell::RefCell;
use std::rc::Rc;

fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-10.0, 10.0)
    } else {
        0.0
    }
}

fn to_samples(raw: &[(f32, f32)]) -> Vec<Complex32> {
    raw.iter()
        .take(2_000)
        .map(|&(re, im)| Complex32::new(sanitize(re), sanitize(im)))
        .collect()
}

fn run_collecting(samples: &[Complex32]) -> Vec<[Complex32; 48]> {
    let received: Rc<RefCell<Vec<[Complex32; 48]>>> = Rc::new(RefCell::new(Vec::new()));
    let received_inner = Rc::clone(&received);
    let mut sync = FrameSynchronizer::new(SynchronizerSettings::default(), move |data| {
        received_inner.borrow_mut().push(*data);
        ConsumerAction::Continue
    });
    sync.process(samples);
    drop(sync);
    Rc::try_unwrap(received).unwrap().into_inner()
}

#[quickcheck]
fn process_never_mutates_its_input(raw: Vec<(f32, f32)>) -> bool {
    let samples = to_samples(&raw);
    let before = samples.clone();

    let received: Rc<RefCell<Vec<[Complex32; 48]>>> = Rc::new(RefCell::new(Vec::new()));
    let mut sync = FrameSynchronizer::new(SynchronizerSettings::default(), move |data| {
        received.borrow_mut().push(*data);
        ConsumerAction::Continue
    });
    sync.process(&samples);

    samples == before
}

#[quickcheck]
fn reset_restores_initial_invariants(raw: Vec<(f32, f32)>) -> bool {
    let samples = to_samples(&raw);
    let received: Rc<RefCell<Vec<[Complex32; 48]>>> = Rc::new(RefCell::new(Vec::new()));
    let mut sync = FrameSynchronizer::new(SynchronizerSettings::default(), move |data| {
        received.borrow_mut().push(*data);
        ConsumerAction::Continue
    });
    sync.process(&samples);
    sync.reset();

    sync.state() == SyncState::SeekShort
        && sync.timer() == 0
        && sync.frequency() == 0.0
        && sync.coarse_gain() == 1.0
}

#[quickcheck]
fn splitting_a_batch_does_not_change_the_callback_sequence(raw: Vec<(f32, f32)>, split_at: usize) -> bool {
    let samples = to_samples(&raw);
    if samples.is_empty() {
        return true;
    }
    let split_at = split_at % samples.len();

    let whole = run_collecting(&samples);

    let received: Rc<RefCell<Vec<[Complex32; 48]>>> = Rc::new(RefCell::new(Vec::new()));
    let received_inner = Rc::clone(&received);
    let mut sync = FrameSynchronizer::new(SynchronizerSettings::default(), move |data| {
        received_inner.borrow_mut().push(*data);
        ConsumerAction::Continue
    });
    sync.process(&samples[..split_at]);
    sync.process(&samples[split_at..]);
    drop(sync);
    let split = Rc::try_unwrap(received).unwrap().into_inner();

    whole == split
}

#[test]
fn gain_is_zero_on_every_null_subcarrier_after_acquisition() {
    let fft = ofdm64_dsp::RustFftForward::new(64);
    let stream = common::preamble(&fft);

    let mut sync = FrameSynchronizer::new(SynchronizerSettings::default(), |_data| ConsumerAction::Continue);
    sync.process(&stream);

    for i in 0..64 {
        if ofdm64_preamble::subcarrier_type(i) == ofdm64_preamble::SubcarrierType::Null {
            assert_eq!(sync.gain()[i], Complex32::default());
        }
    }
}
