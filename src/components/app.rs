use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlElement, MouseEvent, TouchEvent, TouchList};
use yew::prelude::*;

use super::{hud_panel::HudPanel, intro_overlay::IntroOverlay};
use crate::config::AppConfig;
use crate::model::{GestureAction, Point, TransformController};
use crate::state::{BackgroundTap, Contact, MOUSE_ID, TouchState};

/// Which element the mouse button went down on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Pointer {
    #[default]
    Idle,
    Surface,
    Background,
}

/// A DOM listener removed from its target when dropped.
struct Listener {
    target: EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, name: &'static str, callback: Closure<dyn FnMut(Event)>) -> Option<Self> {
        // touch handlers call prevent_default, so they cannot be passive
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            callback.as_ref().unchecked_ref(),
            &opts,
        ) {
            log::warn!("could not listen for {name}: {e:?}");
            return None;
        }
        Some(Self { target: target.clone(), name, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.name, self.callback.as_ref().unchecked_ref());
    }
}

fn contacts_of(list: &TouchList) -> Vec<Contact> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Contact::new(t.identifier(), t.client_x() as f64, t.client_y() as f64))
        .collect()
}

fn mouse_contact(e: &MouseEvent) -> Contact {
    Contact::new(MOUSE_ID, e.client_x() as f64, e.client_y() as f64)
}

fn emit(dispatcher: &UseReducerDispatcher<TransformController>, actions: Vec<GestureAction>) {
    for action in actions {
        log::trace!("{action:?}");
        dispatcher.dispatch(action);
    }
}

fn surface_touch_handler(
    touch: Rc<RefCell<TouchState>>,
    dispatcher: UseReducerDispatcher<TransformController>,
) -> Closure<dyn FnMut(Event)> {
    Closure::<dyn FnMut(Event)>::new(move |e: Event| {
        let Some(te) = e.dyn_ref::<TouchEvent>() else {
            return;
        };
        te.prevent_default();
        te.stop_propagation();
        // targetTouches: only fingers that started on the surface
        let contacts = contacts_of(&te.target_touches());
        let now = te.time_stamp();
        let actions = {
            let mut ts = touch.borrow_mut();
            match te.type_().as_str() {
                "touchstart" => ts.start(&contacts, now),
                "touchmove" => ts.moved(&contacts, now),
                "touchend" => ts.end(&contacts, now),
                _ => ts.cancel(),
            }
        };
        emit(&dispatcher, actions);
    })
}

fn background_touch_handler(
    background: Rc<RefCell<BackgroundTap>>,
    dispatcher: UseReducerDispatcher<TransformController>,
) -> Closure<dyn FnMut(Event)> {
    Closure::<dyn FnMut(Event)>::new(move |e: Event| {
        let Some(te) = e.dyn_ref::<TouchEvent>() else {
            return;
        };
        te.prevent_default();
        let first = te
            .changed_touches()
            .item(0)
            .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64));
        let mut bg = background.borrow_mut();
        match te.type_().as_str() {
            "touchstart" => match first {
                Some(p) if te.touches().length() == 1 => bg.press(p, te.time_stamp()),
                _ => bg.fail(),
            },
            "touchmove" => {
                if let Some(p) = first {
                    bg.moved(p);
                }
            }
            "touchend" => {
                if te.touches().length() == 0 {
                    if let Some(action) = bg.release(te.time_stamp()) {
                        drop(bg);
                        emit(&dispatcher, vec![action]);
                    }
                }
            }
            _ => bg.cancel(),
        }
    })
}

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    #[prop_or_default]
    pub config: AppConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let controller = use_reducer(TransformController::default);
    let stage_ref = use_node_ref();
    let surface_ref = use_node_ref();
    let show_intro = use_state(|| true);
    let gestures = props.config.gestures;
    let touch = use_mut_ref(|| TouchState::new(gestures));
    let background = use_mut_ref(|| BackgroundTap::new(gestures));
    let pointer = use_mut_ref(Pointer::default);

    {
        let stage_ref = stage_ref.clone();
        let surface_ref = surface_ref.clone();
        let dispatcher = controller.dispatcher();
        use_effect_with((), move |_| {
            let mut listeners: Vec<Listener> = Vec::new();
            let elements = (
                web_sys::window(),
                stage_ref.cast::<HtmlElement>(),
                surface_ref.cast::<HtmlElement>(),
            );
            if let (Some(window), Some(stage), Some(surface)) = elements {
                let stage: &EventTarget = stage.as_ref();
                let surface: &EventTarget = surface.as_ref();
                let window: &EventTarget = window.as_ref();

                for name in ["touchstart", "touchmove", "touchend", "touchcancel"] {
                    listeners.extend(Listener::attach(
                        surface,
                        name,
                        surface_touch_handler(touch.clone(), dispatcher.clone()),
                    ));
                    listeners.extend(Listener::attach(
                        stage,
                        name,
                        background_touch_handler(background.clone(), dispatcher.clone()),
                    ));
                }

                let surface_down = {
                    let touch = touch.clone();
                    let pointer = pointer.clone();
                    let dispatcher = dispatcher.clone();
                    Closure::<dyn FnMut(Event)>::new(move |e: Event| {
                        let Some(me) = e.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        me.stop_propagation();
                        if me.button() != 0 {
                            return;
                        }
                        *pointer.borrow_mut() = Pointer::Surface;
                        let actions = touch.borrow_mut().start(&[mouse_contact(me)], me.time_stamp());
                        emit(&dispatcher, actions);
                    })
                };
                listeners.extend(Listener::attach(surface, "mousedown", surface_down));

                let stage_down = {
                    let background = background.clone();
                    let pointer = pointer.clone();
                    Closure::<dyn FnMut(Event)>::new(move |e: Event| {
                        let Some(me) = e.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        if me.button() != 0 {
                            return;
                        }
                        *pointer.borrow_mut() = Pointer::Background;
                        let c = mouse_contact(me);
                        background.borrow_mut().press(Point::new(c.x, c.y), me.time_stamp());
                    })
                };
                listeners.extend(Listener::attach(stage, "mousedown", stage_down));

                let mouse_move = {
                    let touch = touch.clone();
                    let background = background.clone();
                    let pointer = pointer.clone();
                    let dispatcher = dispatcher.clone();
                    Closure::<dyn FnMut(Event)>::new(move |e: Event| {
                        let Some(me) = e.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        let c = mouse_contact(me);
                        match *pointer.borrow() {
                            Pointer::Surface => {
                                let actions = touch.borrow_mut().moved(&[c], me.time_stamp());
                                emit(&dispatcher, actions);
                            }
                            Pointer::Background => background.borrow_mut().moved(Point::new(c.x, c.y)),
                            Pointer::Idle => {}
                        }
                    })
                };
                listeners.extend(Listener::attach(window, "mousemove", mouse_move));

                let mouse_up = {
                    let touch = touch.clone();
                    let background = background.clone();
                    let pointer = pointer.clone();
                    let dispatcher = dispatcher.clone();
                    Closure::<dyn FnMut(Event)>::new(move |e: Event| {
                        let now = e.time_stamp();
                        let released = std::mem::take(&mut *pointer.borrow_mut());
                        let actions = match released {
                            Pointer::Surface => touch.borrow_mut().end(&[], now),
                            Pointer::Background => background.borrow_mut().release(now).into_iter().collect(),
                            Pointer::Idle => Vec::new(),
                        };
                        emit(&dispatcher, actions);
                    })
                };
                listeners.extend(Listener::attach(window, "mouseup", mouse_up));

                log::debug!("attached {} listeners", listeners.len());
            } else {
                log::warn!("stage not mounted; gestures disabled");
            }
            move || drop(listeners)
        });
    }

    let hide_intro = {
        let show_intro = show_intro.clone();
        Callback::from(move |_| show_intro.set(false))
    };

    let size = props.config.surface_size_px;
    let surface_style = format!(
        "position:absolute; {} width:{size}px; height:{size}px; transform:{}; background:{}; border-radius:6px; box-shadow:0 4px 14px rgba(0,0,0,0.45); transition:background-color 120ms; cursor:grab;",
        controller.surface.css_position(),
        controller.surface.css_transform(),
        controller.fill_color(),
    );

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#0e1116; color:#c9d1d9; font-family:sans-serif; touch-action:none; user-select:none;">
            <div ref={stage_ref} style="position:absolute; inset:0;">
                <div ref={surface_ref} style={surface_style}></div>
            </div>
            <HudPanel surface={controller.surface} fill={AttrValue::from(controller.fill_color())} updates={controller.version} />
            <IntroOverlay show={*show_intro} {hide_intro} />
        </div>
    }
}
