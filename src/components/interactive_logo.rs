use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::driver::FieldController;
use crate::model::FieldConfig;
use crate::util::clog;

pub const DEFAULT_LOGO_SRC: &str = "/logo-q-blue.png";

#[derive(Properties, PartialEq, Clone)]
pub struct InteractiveLogoProps {
    #[prop_or_else(|| AttrValue::from(DEFAULT_LOGO_SRC))]
    pub src: AttrValue,
    /// Overrides the stored/default tuning when set.
    #[prop_or_default]
    pub config: Option<FieldConfig>,
}

#[function_component(InteractiveLogo)]
pub fn interactive_logo(props: &InteractiveLogoProps) -> Html {
    let canvas_ref = use_node_ref();
    let config = use_memo(props.config.clone(), |cfg| {
        cfg.clone().unwrap_or_else(FieldConfig::load).sanitized()
    });

    // Mount on first render and whenever the image or tuning changes; the
    // previous controller is stopped first, so particles are rebuilt from scratch.
    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(
            (props.src.clone(), (*config).clone()),
            move |(src, cfg)| {
                let controller =
                    match FieldController::mount(canvas_ref.cast::<HtmlCanvasElement>(), cfg.clone()) {
                        Ok(mut c) => {
                            c.start();
                            c.load_image(src);
                            Some(c)
                        }
                        Err(e) => {
                            clog(&format!("particle logo not mounted: {e}"));
                            None
                        }
                    };
                move || {
                    if let Some(mut c) = controller {
                        c.stop();
                    }
                }
            },
        );
    }

    let box_style = format!(
        "position:relative; width:{}px; height:{}px; margin-left:-8px;",
        config.canvas_width, config.canvas_height
    );
    html! {
        <div style={box_style}>
            <canvas
                ref={canvas_ref}
                width={(config.canvas_width as u32).to_string()}
                height={(config.canvas_height as u32).to_string()}
                style="position:absolute; inset:0; width:100%; height:100%; background:transparent; image-rendering:auto;"
            />
        </div>
    }
}
