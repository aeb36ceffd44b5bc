use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct IntroOverlayProps {
    pub show: bool,
    pub hide_intro: Callback<()>,
}

#[function_component(IntroOverlay)]
pub fn intro_overlay(props: &IntroOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let hide_cb = props.hide_intro.clone();
    let start_btn = Callback::from(move |_| hide_cb.emit(()));
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.87); border:2px solid #30363d; padding:24px 32px; border-radius:14px; max-width:460px; width:88%; box-shadow:0 0 0 1px #1a1f24, 0 6px 18px rgba(0,0,0,0.6); font-size:14px; line-height:1.4;">
            <h2 style="margin:0 0 12px 0; font-size:22px; color:#58a6ff; text-align:center;">{"Gestures"}</h2>
            <ul style="margin:0 0 12px 18px; padding:0; list-style:disc; display:flex; flex-direction:column; gap:4px;">
                <li>{"Drag the square with one finger (or the mouse) to move it."}</li>
                <li>{"Pinch with two fingers to scale, twist them to rotate."}</li>
                <li>{"Drag, pinch and rotate can all happen in one motion."}</li>
                <li>{"Tap the square to give it a new color."}</li>
                <li>{"Tap the background to put it back where it started."}</li>
            </ul>
            <div style="display:flex; justify-content:center; margin-top:8px;">
                <button onclick={start_btn}>{"Start"}</button>
            </div>
        </div>
    }
}
