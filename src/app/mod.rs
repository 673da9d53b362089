//! Application module
//!
//! Event loop, input routing and engine wiring for the dashboard. The app
//! is the engine's external UI controller: it owns the terminal, feeds
//! pointer events into the engine in the modality the instance was started
//! with, and commits completed drags to the bookmark store through the
//! engine's reorder callback.

mod state;

pub use state::AppState;

use crate::container::{ChildSpec, Container};
use crate::error::{LinkdeckError, Result};
use crate::pointer::{DragEvent, Modality, Point, TouchEvent};
use crate::reorder::{HandleRule, OrderEntry, ReorderEngine, ReorderOptions};
use crate::scroll_lock::ScrollLock;
use crate::store::BookmarkStore;
use crate::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Width of the drag handle column on every bookmark row.
const GRIP_WIDTH: u16 = 2;

/// Main application struct
pub struct App {
    state: Arc<Mutex<AppState>>,
    store: Arc<Mutex<BookmarkStore>>,
    engine: Option<ReorderEngine>,
    scroll_lock: ScrollLock,
    modality: Modality,
    engine_error_logged: bool,
    should_quit: bool,
}

impl App {
    /// Create a new application instance bound to a store file.
    pub fn new(store_path: PathBuf, modality: Modality) -> Result<Self> {
        let store = BookmarkStore::load_or_default(&store_path)?;
        info!(count = store.len(), modality = %modality, "dashboard starting");
        Ok(Self {
            state: Arc::new(Mutex::new(AppState::default())),
            store: Arc::new(Mutex::new(store)),
            engine: None,
            scroll_lock: ScrollLock::new(),
            modality,
            engine_error_logged: false,
            should_quit: false,
        })
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, AppState>> {
        self.state
            .lock()
            .map_err(|e| LinkdeckError::general(format!("state mutex poisoned: {e}")))
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, BookmarkStore>> {
        self.store
            .lock()
            .map_err(|e| LinkdeckError::general(format!("store mutex poisoned: {e}")))
    }

    /// Run the event loop until the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|frame| {
                self.ensure_engine(ui::list_area(frame.area()));
                let locked = self.scroll_lock.is_locked();
                if let (Ok(store), Ok(state)) = (self.lock_store(), self.lock_state()) {
                    ui::render(frame, self.engine.as_ref(), &store, &state, locked);
                }
            })?;

            if self.should_quit {
                break;
            }
            if event::poll(Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) => self.on_key(key),
                    Event::Mouse(mouse) => self.on_mouse(mouse),
                    Event::Resize(_, _) => {} // next draw restacks the list
                    _ => {}
                }
            }
        }

        // explicit teardown: releases the scroll lock even mid-drag
        if let Some(engine) = &mut self.engine {
            engine.destroy();
        }
        Ok(())
    }

    /// Build the reorder engine on first draw and keep its container in
    /// step with the frame layout afterwards.
    fn ensure_engine(&mut self, list_area: Rect) {
        match &mut self.engine {
            Some(engine) => {
                if engine.container().area() != list_area {
                    engine.container_mut().resize(list_area);
                    engine.refresh();
                }
            }
            None => match self.build_engine(list_area) {
                Ok(engine) => {
                    self.engine = Some(engine);
                    self.engine_error_logged = false;
                }
                Err(e) => {
                    // the dashboard keeps running with a non-interactive list
                    if !self.engine_error_logged {
                        warn!(error = %e, "reorder engine construction failed");
                        if let Ok(mut state) = self.lock_state() {
                            state.status_message = format!("Reordering unavailable: {e}");
                        }
                        self.engine_error_logged = true;
                    }
                }
            },
        }
    }

    fn build_engine(&self, area: Rect) -> Result<ReorderEngine> {
        let mut container = Container::new(area);
        {
            let store = self.lock_store()?;
            for bookmark in store.bookmarks() {
                container.push(ChildSpec::entry(1).with_sort_key(bookmark.id));
            }
        }

        let store = Arc::clone(&self.store);
        let state = Arc::clone(&self.state);
        let on_reorder: Box<dyn FnMut(&[OrderEntry])> = Box::new(move |snapshot| {
            let message = match store.lock() {
                Ok(mut store) => match store.apply_order(snapshot).and_then(|()| store.save()) {
                    Ok(()) => format!("Order saved ({} bookmarks)", snapshot.len()),
                    Err(e) => {
                        warn!(error = %e, "failed to commit new order");
                        format!("Failed to save order: {e}")
                    }
                },
                Err(_) => "Failed to save order: store unavailable".to_string(),
            };
            if let Ok(mut state) = state.lock() {
                state.status_message = message;
            }
        });

        let engine = ReorderEngine::new(
            container,
            ReorderOptions {
                item_selector: None,
                handle_rule: HandleRule::Grip { width: GRIP_WIDTH },
                modality: self.modality,
                on_reorder: Some(on_reorder),
            },
            self.scroll_lock.clone(),
        )?;
        Ok(engine)
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => {
                if let Some(engine) = &mut self.engine {
                    engine.refresh();
                    debug!("manual refresh requested");
                }
            }
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let point = Point::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_begin(point),
            MouseEventKind::Drag(MouseButton::Left) => self.pointer_move(point),
            MouseEventKind::Up(MouseButton::Left) => self.pointer_end(point),
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                // page scrolling is disabled while a drag holds the lock
                if self.scroll_lock.is_locked() {
                    debug!("scroll input ignored, lock held");
                }
            }
            _ => {}
        }
    }

    fn pointer_begin(&mut self, p: Point) {
        let modality = self.modality;
        if let Some(engine) = &mut self.engine {
            match modality {
                Modality::Fine => engine.handle_drag(DragEvent::Start(p)),
                Modality::Coarse => engine.handle_touch(TouchEvent::Press(p)),
            }
        }
    }

    fn pointer_move(&mut self, p: Point) {
        let modality = self.modality;
        if let Some(engine) = &mut self.engine {
            match modality {
                Modality::Fine => engine.handle_drag(DragEvent::Over(p)),
                Modality::Coarse => engine.handle_touch(TouchEvent::Move(p)),
            }
        }
    }

    fn pointer_end(&mut self, p: Point) {
        // read the guard before the end event clears it
        let suppress_default = self.engine.as_ref().is_some_and(|e| match self.modality {
            Modality::Fine => e.drop_guard_active(),
            Modality::Coarse => e.is_dragging(),
        });
        let modality = self.modality;
        if let Some(engine) = &mut self.engine {
            match modality {
                Modality::Fine => engine.handle_drag(DragEvent::End),
                Modality::Coarse => engine.handle_touch(TouchEvent::Release),
            }
        }
        // default release action: highlight the row under the pointer,
        // suppressed when this release finished a drag
        if !suppress_default {
            self.select_at(p);
        }
    }

    fn select_at(&mut self, p: Point) {
        let Some(engine) = &self.engine else {
            return;
        };
        let Some(id) = engine.container().child_at(p) else {
            return;
        };
        let Some(key) = engine.container().node(id).and_then(|n| n.sort_key()) else {
            return;
        };
        let line = match self.lock_store() {
            Ok(store) => store.by_id(key).map(|b| format!("{}  {}", b.title, b.url)),
            Err(_) => None,
        };
        if let Some(line) = line
            && let Ok(mut state) = self.lock_state()
        {
            state.selected = Some(key);
            state.status_message = line;
        }
    }
}
