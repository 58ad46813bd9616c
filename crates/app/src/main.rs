//! formview: load an OBJ, compose form matrices, upload to `uFormMatrix`.
//!
//! Flags: --obj=<url|path> --uniform=<name> --gpu-backend=auto|vulkan|dx12|metal|gl
//! and, applied in command-line order: --translate=x,y,z --scale=x,y,z
//! --shear=<rad> --rotate-x=<rad> --rotate-y=<rad> --rotate-z=<rad>

use anyhow::{Context, Result, bail};
use asset::ObjLoader;
use corelib::{FORM_MATRIX_UNIFORM, FormMatrix, FormUploader, MatrixStack, form};
use renderer::UniformRegistry;

fn parse_backend_arg(args: &[String]) -> wgpu::Backends {
    // Accept: --gpu-backend=auto|vulkan|dx12|metal|gl
    let mut backends = wgpu::Backends::all(); // default = auto
    for arg in args {
        if let Some(val) = arg.strip_prefix("--gpu-backend=") {
            backends = match val.to_ascii_lowercase().as_str() {
                "auto" => wgpu::Backends::all(),
                "vulkan" | "vk" => wgpu::Backends::VULKAN,
                "dx12" | "d3d12" => wgpu::Backends::DX12,
                "metal" | "mtl" => wgpu::Backends::METAL,
                "gl" | "opengl" | "gles" => wgpu::Backends::GL,
                other => {
                    log::warn!("Unknown backend '{}', falling back to auto.", other);
                    wgpu::Backends::all()
                }
            };
        }
    }
    backends
}

fn parse_value_arg<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter().rev().find_map(|arg| arg.strip_prefix(key))
}

fn parse_f32(value: &str, flag: &str) -> Result<f32> {
    value
        .trim()
        .parse::<f32>()
        .with_context(|| format!("{flag}: '{value}' is not a number"))
}

fn parse_vec3(value: &str, flag: &str) -> Result<[f32; 3]> {
    let parts: Vec<&str> = value.split(',').collect();
    let [x, y, z] = parts.as_slice() else {
        bail!("{flag}: expected x,y,z, got '{value}'");
    };
    Ok([parse_f32(x, flag)?, parse_f32(y, flag)?, parse_f32(z, flag)?])
}

/// Transform flags in the order given, each as (label, matrix).
fn parse_transform_args(args: &[String]) -> Result<Vec<(String, FormMatrix)>> {
    let mut steps = Vec::new();
    for arg in args {
        let Some((flag, value)) = arg.split_once('=') else {
            continue;
        };
        let matrix = match flag {
            "--translate" => {
                let [x, y, z] = parse_vec3(value, flag)?;
                form::translation(x, y, z)
            }
            "--scale" => {
                let [x, y, z] = parse_vec3(value, flag)?;
                form::scale(x, y, z)
            }
            "--shear" => form::shear(parse_f32(value, flag)?),
            "--rotate-x" => form::rotate_x(parse_f32(value, flag)?),
            "--rotate-y" => form::rotate_y(parse_f32(value, flag)?),
            "--rotate-z" => form::rotate_z(parse_f32(value, flag)?),
            _ => continue,
        };
        steps.push((arg.clone(), matrix));
    }
    Ok(steps)
}

fn upload_headless(backends: wgpu::Backends, uniform: &str, matrix: FormMatrix) -> Result<()> {
    let (device, queue) = match renderer::headless_device(backends) {
        Ok(pair) => pair,
        Err(err) => {
            log::warn!("Skipping GPU upload: {}", err);
            return Ok(());
        }
    };

    let mut registry = UniformRegistry::new(&queue);
    registry.register(&device, uniform);
    FormUploader::new(&mut registry)
        .with_uniform(uniform)
        .upload(matrix)?;
    queue.submit(std::iter::empty());
    log::info!("Uploaded form matrix to '{}'", uniform);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let backends = parse_backend_arg(&args);
    let uniform = parse_value_arg(&args, "--uniform=").unwrap_or(FORM_MATRIX_UNIFORM);
    let steps = parse_transform_args(&args)?;
    log::info!(
        "Starting formview. Backend: {:?}, uniform={}, transforms={}",
        backends,
        uniform,
        steps.len()
    );

    if let Some(url) = parse_value_arg(&args, "--obj=") {
        let loader = ObjLoader::new()?;
        let mesh = loader
            .load(url)
            .wait()
            .with_context(|| format!("Error loading OBJ: {url}"))?;
        if !mesh.is_valid() {
            log::warn!("{} has no drawable triangles", url);
        }
        if !mesh.indices_in_bounds() {
            log::warn!("{} references vertices that were never declared", url);
        }
        println!(
            "{}: {} vertices, {} triangles, {} normals, {} texture coords",
            url,
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.normal_count(),
            mesh.texture_coord_count()
        );
    }

    let mut stack = MatrixStack::new();
    for (label, matrix) in &steps {
        log::debug!("Applying {}", label);
        stack.apply(*matrix);
    }
    let matrix = stack.current();

    upload_headless(backends, uniform, matrix)?;

    println!("{} (column-major):", uniform);
    for col in matrix.to_cols_array_2d() {
        println!("  [{:>10.4} {:>10.4} {:>10.4} {:>10.4}]", col[0], col[1], col[2], col[3]);
    }

    log::info!("Done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::Mat4;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn transforms_keep_command_line_order() {
        let a = args(&["--obj=cube.obj", "--scale=2,2,2", "--translate=1,0,0", "--rotate-z=0.5"]);
        let steps = parse_transform_args(&a).unwrap();
        let labels: Vec<&str> = steps.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["--scale=2,2,2", "--translate=1,0,0", "--rotate-z=0.5"]);
        assert_eq!(steps[0].1, form::scale(2.0, 2.0, 2.0));
        assert_eq!(steps[1].1, form::translation(1.0, 0.0, 0.0));
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(parse_transform_args(&args(&["--translate=1,2"])).is_err());
        assert!(parse_transform_args(&args(&["--shear=steep"])).is_err());
        assert!(parse_transform_args(&args(&[])).unwrap().is_empty());
    }

    #[test]
    fn value_args_and_backend() {
        let a = args(&["--uniform=uModel", "--gpu-backend=gl", "--obj=a.obj", "--obj=b.obj"]);
        assert_eq!(parse_value_arg(&a, "--uniform="), Some("uModel"));
        assert_eq!(parse_value_arg(&a, "--obj="), Some("b.obj"));
        assert_eq!(parse_backend_arg(&a), wgpu::Backends::GL);
        assert_eq!(parse_backend_arg(&args(&[])), wgpu::Backends::all());
    }

    #[test]
    fn no_transforms_is_identity() {
        let mut stack = MatrixStack::new();
        for (_, m) in parse_transform_args(&args(&["--obj=x.obj"])).unwrap() {
            stack.apply(m);
        }
        assert_eq!(stack.current(), Mat4::IDENTITY);
    }
}
