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


mod common;

use common::{Call, RecordingGl};
use glade_core::*;

#[test]
fn named_capability_helpers_toggle_the_right_switch() {
    let device = RecordingGl::device();

    device.enable_blend().unwrap();
    device.enable_cull_face().unwrap();
    device.enable_depth_test().unwrap();
    device.enable_depth_clamp().unwrap();
    device.enable_dither().unwrap();
    device.enable_line_smooth().unwrap();
    device.enable_color_logic_operation().unwrap();
    device.enable_clip_distance(3).unwrap();
    device.disable_blend().unwrap();
    device.disable_clip_distance(3).unwrap();

    assert_eq!(
        device.native().calls(),
        vec![
            Call::Enable(Capability::Blend),
            Call::Enable(Capability::CullFace),
            Call::Enable(Capability::DepthTest),
            Call::Enable(Capability::DepthClamp),
            Call::Enable(Capability::Dither),
            Call::Enable(Capability::LineSmooth),
            Call::Enable(Capability::ColorLogicOp),
            Call::Enable(Capability::ClipDistance(3)),
            Call::Disable(Capability::Blend),
            Call::Disable(Capability::ClipDistance(3)),
        ]
    );
}

#[test]
fn clip_distance_index_is_bounded() {
    let device = RecordingGl::device();

    device.enable_clip_distance(MAX_CLIP_DISTANCES - 1).unwrap();
    let err = device.disable_clip_distance(MAX_CLIP_DISTANCES).unwrap_err();

    assert_eq!(
        err,
        ResourceError::ClipDistanceOutOfRange { index: 8, max: 7 }
    );
    assert_eq!(device.native().calls().len(), 1);
}

#[test]
fn failed_enable_names_the_capability() {
    let device = RecordingGl::device();
    device.native().fail_on(
        |call| matches!(call, Call::Enable(Capability::DepthClamp)),
        GlErrorKind::InvalidEnum,
    );

    let err = device.enable_depth_clamp().unwrap_err();

    assert_eq!(err.to_string(), "failed to enable depth clamp: invalid enum");
}

#[test]
fn blend_setup_is_forwarded() {
    let device = RecordingGl::device();

    device
        .set_blend_equation(BlendEquation::Add, BlendEquation::Max)
        .unwrap();
    device
        .set_blend_function(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha)
        .unwrap();
    device
        .set_blend_function_separate(
            BlendFactor::One,
            BlendFactor::OneMinusSrcColor,
            BlendFactor::ConstantAlpha,
            BlendFactor::Zero,
        )
        .unwrap();
    device.set_blend_color(0.25, 0.5, 0.75, 1.0).unwrap();

    assert_eq!(
        device.native().calls(),
        vec![
            Call::BlendEquationSeparate(BlendEquation::Add, BlendEquation::Max),
            Call::BlendFunc(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha),
            Call::BlendFuncSeparate(
                BlendFactor::One,
                BlendFactor::OneMinusSrcColor,
                BlendFactor::ConstantAlpha,
                BlendFactor::Zero,
            ),
            Call::BlendColor(0.25, 0.5, 0.75, 1.0),
        ]
    );
}

#[test]
fn rasterizer_state_is_forwarded() {
    let device = RecordingGl::device();

    device.set_viewport(0, 0, 800, 600).unwrap();
    device
        .set_color_logic_operation(LogicOperation::ExclusiveOr)
        .unwrap();
    device.set_cull_face_mode(CullFaceMode::Back).unwrap();
    device.set_front_face(FrontFace::Cw).unwrap();
    device
        .set_depth_test_function(DepthFunction::LessOrEqual)
        .unwrap();
    device.set_depth_range(0.0, 1.0).unwrap();
    device.set_point_size(4.0).unwrap();
    device.set_line_width(2.0).unwrap();

    assert_eq!(
        device.native().calls(),
        vec![
            Call::Viewport(0, 0, 800, 600),
            Call::LogicOp(LogicOperation::ExclusiveOr),
            Call::CullFace(CullFaceMode::Back),
            Call::FrontFace(FrontFace::Cw),
            Call::DepthFunc(DepthFunction::LessOrEqual),
            Call::DepthRange(0.0, 1.0),
            Call::PointSize(4.0),
            Call::LineWidth(2.0),
        ]
    );
}

#[test]
fn viewport_larger_than_the_native_range_is_rejected() {
    let device = RecordingGl::device();

    let err = device.set_viewport(0, 0, 640, u32::MAX).unwrap_err();

    assert_eq!(
        err,
        ResourceError::ValueOutOfRange {
            parameter: "viewport height",
            value: u64::from(u32::MAX),
        }
    );
    assert!(device.native().calls().is_empty());
}
