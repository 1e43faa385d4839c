//! Frame scheduling.
//!
//! A [`Ticker`] is the frame-callback source (a vsync callback in a real
//! host). [`FrameLoop`] subscribes to one and buffers the tick timestamps;
//! `step` then feeds them to a [`Renderer`] in order. Ticks never render
//! directly, so mutations made between ticks are only observed at the next
//! frame boundary.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use weft_anim::{BusEvent, EventBus, Subscription};

use crate::error::Result;
use crate::renderer::Renderer;

pub trait Ticker {
    /// Start producing ticks.
    fn init(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    /// Stop for good and drop every listener.
    fn destroy(&mut self);
    /// Call `callback` with the timestamp of every tick.
    fn on_tick(&mut self, callback: Box<dyn FnMut(f64)>) -> Subscription;
    fn unsubscribe(&mut self, subscription: Subscription) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tick(f64);

impl BusEvent for Tick {
    type Name = ();

    fn name(&self) {}
}

/// Deterministic ticker advanced by hand, one fixed interval at a time.
#[derive(Debug)]
pub struct ManualTicker {
    interval: f64,
    now: f64,
    running: bool,
    bus: EventBus<Tick>,
}

impl ManualTicker {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            now: 0.0,
            running: false,
            bus: EventBus::new(),
        }
    }

    /// Advance one interval and tick. Returns `None` while not running.
    pub fn advance(&mut self) -> Option<f64> {
        let next = self.now + self.interval;
        self.tick_at(next)
    }

    /// Tick at `timestamp`, which becomes the new current time.
    pub fn tick_at(&mut self, timestamp: f64) -> Option<f64> {
        if !self.running {
            return None;
        }
        self.now = timestamp;
        self.bus.emit(&Tick(timestamp));
        Some(timestamp)
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Ticker for ManualTicker {
    fn init(&mut self) {
        self.running = true;
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn resume(&mut self) {
        self.running = true;
    }

    fn destroy(&mut self) {
        self.running = false;
        self.bus.clear();
    }

    fn on_tick(&mut self, mut callback: Box<dyn FnMut(f64)>) -> Subscription {
        self.bus.subscribe((), move |tick: &Tick| callback(tick.0))
    }

    fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.bus.unsubscribe(subscription)
    }
}

/// Connects a ticker to a renderer.
pub struct FrameLoop<K: Ticker> {
    ticker: K,
    pending: Rc<RefCell<VecDeque<f64>>>,
    subscription: Subscription,
}

impl<K: Ticker> FrameLoop<K> {
    pub fn new(mut ticker: K) -> Self {
        ticker.init();
        let pending: Rc<RefCell<VecDeque<f64>>> = Rc::default();
        let sink = pending.clone();
        let subscription = ticker.on_tick(Box::new(move |timestamp| {
            sink.borrow_mut().push_back(timestamp);
        }));
        Self {
            ticker,
            pending,
            subscription,
        }
    }

    pub fn ticker(&self) -> &K {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut K {
        &mut self.ticker
    }

    /// Buffered ticks not yet stepped.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Run a frame for every buffered tick; returns the frames that
    /// actually rendered.
    pub fn step<T: Default + 'static>(&mut self, renderer: &mut Renderer<T>) -> Result<Vec<T>> {
        let ticks: Vec<f64> = self.pending.borrow_mut().drain(..).collect();
        let mut outputs = Vec::new();
        for timestamp in ticks {
            if let Some(output) = renderer.frame(timestamp)? {
                outputs.push(output);
            }
        }
        Ok(outputs)
    }
}

impl<K: Ticker> Drop for FrameLoop<K> {
    fn drop(&mut self) {
        self.ticker.unsubscribe(self.subscription);
        self.ticker.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_manual_ticker_only_ticks_while_running() {
        let mut ticker = ManualTicker::new(16.0);
        assert_eq!(ticker.advance(), None);

        let seen = Rc::new(Cell::new(0.0));
        let sink = seen.clone();
        let sub = ticker.on_tick(Box::new(move |t| sink.set(t)));
        ticker.init();
        assert_eq!(ticker.advance(), Some(16.0));
        assert_eq!(ticker.advance(), Some(32.0));
        assert_eq!(seen.get(), 32.0);

        ticker.pause();
        assert_eq!(ticker.advance(), None);
        ticker.resume();
        assert_eq!(ticker.tick_at(100.0), Some(100.0));
        assert_eq!(seen.get(), 100.0);

        assert!(ticker.unsubscribe(sub));
        ticker.advance();
        assert_eq!(seen.get(), 100.0);
    }

    #[test]
    fn test_frame_loop_buffers_ticks() {
        let mut frames = FrameLoop::new(ManualTicker::new(10.0));
        assert!(frames.ticker().is_running());
        frames.ticker_mut().advance();
        frames.ticker_mut().advance();
        assert_eq!(frames.pending(), 2);

        let mut renderer: Renderer<Vec<String>> = Renderer::new();
        let outputs = frames.step(&mut renderer).unwrap();
        assert!(outputs.is_empty());
        assert_eq!(frames.pending(), 0);
    }
}
