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

const VERTEX: &str = "#version 330 core\nvoid main() {}";
const FRAGMENT: &str = "#version 330 core\nout vec4 color;\nvoid main() {}";
const GEOMETRY: &str = "#version 330 core\nlayout(points) in;\nvoid main() {}";

fn program(device: &GlDevice<RecordingGl>) -> Shader<u32> {
    let shader = device
        .create_shader(&ShaderSources::new(VERTEX, FRAGMENT))
        .unwrap();
    device.native().clear_calls();
    shader
}

#[test]
fn create_shader_links_and_discards_stages() {
    let device = RecordingGl::device();

    let shader = device
        .create_shader(&ShaderSources::new(VERTEX, FRAGMENT))
        .unwrap();

    let program = shader.handle();
    let calls = device.native().calls();
    let (vertex, fragment) = match (&calls[0], &calls[3]) {
        (Call::CreateShader(ShaderStage::Vertex, v), Call::CreateShader(ShaderStage::Fragment, f)) => {
            (*v, *f)
        }
        other => panic!("unexpected stage creation {other:?}"),
    };
    assert_eq!(
        calls,
        vec![
            Call::CreateShader(ShaderStage::Vertex, vertex),
            Call::ShaderSource(vertex, VERTEX.to_string()),
            Call::CompileShader(vertex),
            Call::CreateShader(ShaderStage::Fragment, fragment),
            Call::ShaderSource(fragment, FRAGMENT.to_string()),
            Call::CompileShader(fragment),
            Call::CreateProgram(program),
            Call::AttachShader(program, vertex),
            Call::AttachShader(program, fragment),
            Call::LinkProgram(program),
            Call::DetachShader(program, vertex),
            Call::DeleteShader(vertex),
            Call::DetachShader(program, fragment),
            Call::DeleteShader(fragment),
        ]
    );
}

#[test]
fn geometry_stage_is_compiled_when_given() {
    let device = RecordingGl::device();

    device
        .create_shader(&ShaderSources::new(VERTEX, FRAGMENT).with_geometry(GEOMETRY))
        .unwrap();

    let stages: Vec<ShaderStage> = device
        .native()
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::CreateShader(stage, _) => Some(stage),
            _ => None,
        })
        .collect();
    assert_eq!(
        stages,
        vec![ShaderStage::Vertex, ShaderStage::Geometry, ShaderStage::Fragment]
    );
}

#[test]
fn compile_failure_carries_the_truncated_log() {
    let mut device = RecordingGl::device();
    let mut settings = device.settings().clone();
    settings.shader_log_max_length = 9;
    device.set_settings(settings);
    device.native().compile_ok.set(false);
    *device.native().info_log.borrow_mut() = "0:1(1): error: syntax error".to_string();

    let err = device
        .create_shader(&ShaderSources::new(VERTEX, FRAGMENT))
        .unwrap_err();

    assert_eq!(
        err,
        ResourceError::Shader(ShaderError::Compilation {
            stage: ShaderStage::Vertex,
            log: "0:1(1): e".to_string(),
        })
    );
    let calls = device.native().calls();
    assert!(!calls.iter().any(|call| matches!(call, Call::CreateProgram(_))));
    assert!(matches!(calls.last(), Some(Call::DeleteShader(_))));
}

#[test]
fn link_failure_deletes_program_and_stages() {
    let device = RecordingGl::device();
    device.native().link_ok.set(false);
    *device.native().info_log.borrow_mut() = "undefined reference".to_string();

    let err = device
        .create_shader(&ShaderSources::new(VERTEX, FRAGMENT))
        .unwrap_err();

    assert_eq!(
        err,
        ResourceError::Shader(ShaderError::Link {
            log: "undefined reference".to_string(),
        })
    );
    let calls = device.native().calls();
    assert_eq!(
        calls
            .iter()
            .filter(|call| matches!(call, Call::DeleteShader(_)))
            .count(),
        2
    );
    assert!(calls.iter().any(|call| matches!(call, Call::DeleteProgram(_))));
    assert!(!calls.iter().any(|call| matches!(call, Call::DetachShader(..))));
}

#[test]
fn uniform_lookup_reports_absent_names_as_none() {
    let device = RecordingGl::device();
    let shader = program(&device);

    assert_eq!(device.uniform_location(&shader, "model").unwrap(), Some(5));
    assert_eq!(device.uniform_location(&shader, "unused_tint").unwrap(), None);
}

#[test]
fn missing_attribute_is_an_error() {
    let device = RecordingGl::device();
    let shader = program(&device);

    assert_eq!(device.attribute_location(&shader, "color").unwrap(), 1);
    let err = device.attribute_location(&shader, "normal").unwrap_err();
    assert_eq!(
        err,
        ResourceError::Shader(ShaderError::AttributeNotFound {
            name: "normal".to_string()
        })
    );
}

#[test]
fn uniform_setters_forward_values() {
    let device = RecordingGl::device();
    let shader = program(&device);
    device.use_shader(&shader).unwrap();
    let location = device.uniform_location(&shader, "u").unwrap().unwrap();

    let identity = [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ];
    device.set_uniform_mat4(&location, false, &identity).unwrap();
    device.set_uniform_mat3(&location, true, &[0.5; 9]).unwrap();
    device.set_uniform_f32(&location, 2.5).unwrap();
    device.set_uniform_f32_slice(&location, &[1.0, 2.0]).unwrap();
    device.set_uniform_i32(&location, -3).unwrap();
    device.set_uniform_i32_slice(&location, &[4, 5]).unwrap();
    device.set_uniform_u32(&location, 6).unwrap();
    device.set_uniform_u32_slice(&location, &[7]).unwrap();

    assert_eq!(
        device.native().calls(),
        vec![
            Call::UseProgram(Some(shader.handle())),
            Call::UniformMatrix4(1, false, identity.to_vec()),
            Call::UniformMatrix3(1, true, vec![0.5; 9]),
            Call::UniformF32(1, 2.5),
            Call::UniformF32Slice(1, vec![1.0, 2.0]),
            Call::UniformI32(1, -3),
            Call::UniformI32Slice(1, vec![4, 5]),
            Call::UniformU32(1, 6),
            Call::UniformU32Slice(1, vec![7]),
        ]
    );
}

#[test]
fn draw_range_enables_attributes_for_the_draw_only() {
    let device = RecordingGl::device();
    let attributes = [
        Attribute::float(0, 3, 24, 0),
        Attribute::float(1, 3, 24, 12),
    ];

    device
        .draw_range(&attributes, Primitive::Triangles, 0, 3)
        .unwrap();

    assert_eq!(
        device.native().calls(),
        vec![
            Call::EnableVertexAttribArray(0),
            Call::VertexAttribPointer(0, 3, AttributeType::Float, false, 24, 0),
            Call::EnableVertexAttribArray(1),
            Call::VertexAttribPointer(1, 3, AttributeType::Float, false, 24, 12),
            Call::DrawArrays(Primitive::Triangles, 0, 3),
            Call::DisableVertexAttribArray(0),
            Call::DisableVertexAttribArray(1),
        ]
    );
}

#[test]
fn failed_draw_still_disables_attributes() {
    let device = RecordingGl::device();
    device.native().fail_on(
        |call| matches!(call, Call::DrawArrays(..)),
        GlErrorKind::InvalidOperation,
    );

    let err = device
        .draw_range(&[Attribute::float(0, 2, 0, 0)], Primitive::LineStrip, 2, 4)
        .unwrap_err();

    assert_eq!(
        err,
        ResourceError::Backend {
            operation: "draw arrays".into(),
            kind: GlErrorKind::InvalidOperation,
        }
    );
    assert_eq!(
        device.native().calls().last(),
        Some(&Call::DisableVertexAttribArray(0))
    );
}

#[test]
fn free_shader_deletes_the_program() {
    let device = RecordingGl::device();
    let shader = program(&device);

    device.free_shader(shader).unwrap();

    assert_eq!(
        device.native().calls(),
        vec![Call::DeleteProgram(shader.handle())]
    );
}

#[test]
fn draw_arguments_beyond_the_native_range_are_rejected() {
    let device = RecordingGl::device();
    let too_many = i32::MAX as usize + 1;

    let count = device
        .draw_range(&[], Primitive::Triangles, 0, too_many)
        .unwrap_err();
    let stride = device
        .draw_range(
            &[Attribute::float(0, 3, too_many, 0)],
            Primitive::Triangles,
            0,
            3,
        )
        .unwrap_err();

    assert_eq!(
        count,
        ResourceError::ValueOutOfRange {
            parameter: "vertex count",
            value: too_many as u64,
        }
    );
    assert_eq!(
        stride,
        ResourceError::ValueOutOfRange {
            parameter: "attribute stride",
            value: too_many as u64,
        }
    );
    assert!(device.native().calls().is_empty());
}
