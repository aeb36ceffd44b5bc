use crate::model::SurfaceState;
use crate::util::{format_degrees, format_offset, format_scale};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HudPanelProps {
    pub surface: SurfaceState,
    pub fill: AttrValue,
    pub updates: u64,
}

#[function_component]
pub fn HudPanel(props: &HudPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // label | value
    let label_style = "flex:1; font-weight:500; opacity:0.8;";
    let value_style =
        "min-width:90px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let s = props.surface;
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:210px; display:flex; flex-direction:column; gap:8px; font-size:13px; pointer-events:none;">
            <div style={row_style}>
                <span style={label_style}>{"Offset"}</span>
                <span style={value_style}>{ format_offset(s.offset_x, s.offset_y) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Scale"}</span>
                <span style={value_style}>{ format_scale(s.scale) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Rotation"}</span>
                <span style={value_style}>{ format_degrees(s.rotation) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Updates"}</span>
                <span style={value_style}>{ props.updates }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Fill"}</span>
                <span style={format!("{} color:{};", value_style, props.fill)}>{ props.fill.clone() }</span>
            </div>
        </div>
    }
}
