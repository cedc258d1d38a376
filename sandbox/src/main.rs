// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


// Glade Sandbox
// Spinning triangle drawn twice per frame: once into an offscreen
// framebuffer, once into the egui panel.

mod scene;

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use eframe::egui;

use crate::scene::Scene;

struct SandboxApp {
    scene: Arc<Mutex<Option<Scene>>>,
}

impl SandboxApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let gl = cc
            .gl
            .clone()
            .ok_or_else(|| anyhow!("the sandbox needs the glow renderer"))?;
        // SAFETY: eframe keeps this context current on the UI thread, which
        // is the only thread paint callbacks run on.
        let backend = unsafe { glade_infra::GlowBackend::from_context(gl, cc.get_proc_address) };
        let scene = Scene::new(backend)?;
        Ok(Self {
            scene: Arc::new(Mutex::new(Some(scene))),
        })
    }

    fn paint_scene(&self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let angle = ui.input(|input| input.time) as f32;
        let scene = Arc::clone(&self.scene);

        let callback = eframe::egui_glow::CallbackFn::new(move |info, _painter| {
            let Ok(scene) = scene.lock() else {
                log::error!("Sandbox: scene lock poisoned");
                return;
            };
            if let Some(scene) = scene.as_ref() {
                let viewport = info.viewport_in_pixels();
                if let Err(err) = scene.render(angle, viewport) {
                    log::error!("Sandbox: frame failed: {err}");
                }
            }
        });
        ui.painter().add(egui::PaintCallback {
            rect,
            callback: Arc::new(callback),
        });
    }
}

impl eframe::App for SandboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("info").show(ctx, |ui| {
            ui.label("glade sandbox: offscreen pass + on-screen pass every frame");
        });
        egui::CentralPanel::default().show(ctx, |ui| self.paint_scene(ui));
        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let scene = match self.scene.lock() {
            Ok(mut scene) => scene.take(),
            Err(_) => None,
        };
        if let Some(scene) = scene {
            if let Err(err) = scene.destroy() {
                log::error!("Sandbox: failed to release resources: {err}");
            }
        }
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("eframe", log::LevelFilter::Warn)
        .filter_module("egui_glow", log::LevelFilter::Warn)
        .init();

    let options = eframe::NativeOptions {
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Glade Sandbox",
        options,
        Box::new(|cc| Ok(Box::new(SandboxApp::new(cc)?))),
    )
    .map_err(|err| anyhow!("event loop failed: {err}"))
}
